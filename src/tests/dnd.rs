//! End-to-end drag-and-drop gesture tests.

use super::Fixture;
use crate::hit_test::SurfaceElement;
use crate::layout::dnd::{DragEffect, DropPhase};
use crate::layout::Options;
use crate::utils::Rect;

#[test]
fn move_gesture_between_docks() {
    let mut f = Fixture::new();

    assert!(f.press(f.p1_point()));
    assert!(f.drag_to(f.p3_point(), DragEffect::Move));
    assert!(f.release(f.p3_point()));

    assert_eq!(f.members(f.dock_a), vec![f.p2]);
    assert_eq!(f.members(f.dock_b), vec![f.p1, f.p3]);
    assert_eq!(f.tree.owner_of(f.p1), Some(f.dock_b));
    f.tree.verify_invariants();
}

#[test]
fn swap_gesture_between_docks() {
    let mut f = Fixture::new();

    assert!(f.press(f.p1_point()));
    assert!(f.drag_to(f.p3_point(), DragEffect::Link));
    assert!(f.release(f.p3_point()));

    assert_eq!(f.members(f.dock_a), vec![f.p3, f.p2]);
    assert_eq!(f.members(f.dock_b), vec![f.p1]);
    assert_eq!(f.tree.owner_of(f.p1), Some(f.dock_b));
    assert_eq!(f.tree.owner_of(f.p3), Some(f.dock_a));
    f.tree.verify_invariants();
}

#[test]
fn copy_gesture_leaves_source_untouched() {
    let mut f = Fixture::new();

    assert!(f.press(f.p1_point()));
    assert!(f.drag_to(f.p3_point(), DragEffect::Copy));
    assert!(f.release(f.p3_point()));

    assert_eq!(f.members(f.dock_a), vec![f.p1, f.p2]);
    let b_members = f.members(f.dock_b);
    assert_eq!(b_members.len(), 2);
    assert_ne!(b_members[0], f.p1);
    assert_eq!(b_members[1], f.p3);
    f.tree.verify_invariants();
}

#[test]
fn same_dock_move_gesture() {
    let mut f = Fixture::new();

    assert!(f.press(f.p1_point()));
    assert!(f.drag_to(f.p2_point(), DragEffect::Move));
    assert!(f.release(f.p2_point()));

    assert_eq!(f.members(f.dock_a), vec![f.p2, f.p1]);
    f.tree.verify_invariants();
}

#[test]
fn gesture_starts_only_on_drag_areas() {
    let mut f = Fixture::new();

    // The empty part of dock B is a drop area, not a drag area.
    assert!(!f.press(f.dock_b_point()));
    assert!(f.controller.grab().is_none());
    assert!(!f.release(f.p1_point()));
}

#[test]
fn dropping_a_pane_onto_itself_is_invalid() {
    let mut f = Fixture::new();
    let before = f.tree.format_tree();

    assert!(f.press(f.p1_point()));
    assert!(!f.drag_to(f.p1_point(), DragEffect::Move));
    assert!(!f.release(f.p1_point()));
    assert_eq!(f.tree.format_tree(), before);
}

#[test]
fn release_without_move_commits_nothing() {
    let mut f = Fixture::new();
    let before = f.tree.format_tree();

    // No move means no effect was ever requested.
    assert!(f.press(f.p1_point()));
    assert!(!f.release(f.p3_point()));
    assert_eq!(f.tree.format_tree(), before);
}

#[test]
fn cancel_discards_gesture_without_mutation() {
    let mut f = Fixture::new();
    let before = f.tree.format_tree();

    assert!(f.press(f.p1_point()));
    assert!(f.drag_to(f.p3_point(), DragEffect::Move));
    f.cancel();

    assert!(f.controller.grab().is_none());
    assert_eq!(f.controller.handler().phase(), DropPhase::Idle);
    assert!(!f.release(f.p3_point()));
    assert_eq!(f.tree.format_tree(), before);
    f.tree.verify_invariants();
}

#[test]
fn execute_runs_at_most_once_per_gesture() {
    let mut f = Fixture::new();

    assert!(f.press(f.p1_point()));
    assert!(f.drag_to(f.p3_point(), DragEffect::Move));
    assert!(f.release(f.p3_point()));

    // The gesture is consumed; a stray second release is a no-op.
    let after = f.tree.format_tree();
    assert!(!f.release(f.p3_point()));
    assert_eq!(f.tree.format_tree(), after);
}

#[test]
fn repeated_validation_is_stable() {
    let mut f = Fixture::new();

    assert!(f.press(f.p1_point()));
    for _ in 0..5 {
        assert!(f.drag_to(f.p3_point(), DragEffect::Move));
        assert!(!f.drag_to(f.p1_point(), DragEffect::Move));
    }
    assert!(f.drag_to(f.p3_point(), DragEffect::Move));
    assert!(f.release(f.p3_point()));
    f.tree.verify_invariants();
}

#[test]
fn frontmost_droppable_wins() {
    let mut f = Fixture::new();

    assert!(f.press(f.p1_point()));
    f.drag_to(f.p3_point(), DragEffect::Move);

    // Both the dock B element and the P3 element lie under the pointer; the
    // pane is painted on top.
    let grab = f.controller.grab().unwrap();
    assert_eq!(grab.target(), Some(f.p3));
}

#[test]
fn overlay_elements_are_skipped() {
    let mut f = Fixture::new();
    let dock_b = f.dock_b;
    f.surface.push(
        SurfaceElement::new(Rect::new(0., 0., 800., 600.))
            .with_node(dock_b)
            .drop_area()
            .overlay()
            .with_label("drag-ghost"),
    );

    assert!(f.press(f.p1_point()));
    f.drag_to(f.p3_point(), DragEffect::Move);

    let grab = f.controller.grab().unwrap();
    assert_eq!(grab.target(), Some(f.p3));
}

#[test]
fn hidden_elements_are_skipped() {
    let mut f = Fixture::new();
    let p3 = f.p3;
    // Cover P3 with an invisible element; hit testing must fall through to
    // the pane below it.
    f.surface.push(
        SurfaceElement::new(Rect::new(400., 0., 400., 300.))
            .with_node(p3)
            .drag_area()
            .drop_area()
            .hidden()
            .with_label("p3-ghost"),
    );

    assert!(f.press(f.p1_point()));
    f.drag_to(f.p3_point(), DragEffect::Move);
    assert_eq!(f.controller.grab().unwrap().target(), Some(f.p3));
}

#[test]
fn dropping_onto_a_dock_element_targets_the_dock() {
    let mut f = Fixture::new();

    assert!(f.press(f.p1_point()));
    assert!(f.drag_to(f.dock_b_point(), DragEffect::Move));
    assert!(f.release(f.dock_b_point()));

    // Dock B's owner is the root, so the pane lands next to dock B itself.
    assert_eq!(f.members(f.tree.root()), vec![f.dock_a, f.p1, f.dock_b]);
    assert_eq!(f.tree.owner_of(f.p1), Some(f.tree.root()));
    f.tree.verify_invariants();
}

#[test]
fn pointer_outside_any_element_has_no_target() {
    let mut f = Fixture::new();
    let outside = crate::utils::Point::new(900., 700.);

    assert!(f.press(f.p1_point()));
    assert!(!f.drag_to(outside, DragEffect::Move));
    assert!(f.controller.grab().unwrap().target().is_none());
    assert!(!f.release(outside));
}

#[test]
fn drag_disabled_option_blocks_grabs() {
    let mut f = Fixture::with_options(Options {
        drag_enabled: false,
        ..Options::default()
    });

    assert!(!f.press(f.p1_point()));
    assert!(f.controller.grab().is_none());
}

#[test]
fn drop_disabled_option_blocks_targets() {
    let mut f = Fixture::with_options(Options {
        drop_enabled: false,
        ..Options::default()
    });
    let before = f.tree.format_tree();

    assert!(f.press(f.p1_point()));
    assert!(!f.drag_to(f.p3_point(), DragEffect::Move));
    assert!(f.controller.grab().unwrap().target().is_none());
    assert!(!f.release(f.p3_point()));
    assert_eq!(f.tree.format_tree(), before);
}

#[test]
fn unsupported_effect_rejects_the_drop() {
    let mut f = Fixture::new();
    let before = f.tree.format_tree();

    assert!(f.press(f.p1_point()));
    assert!(!f.drag_to(f.p3_point(), DragEffect::None));
    assert!(!f.release(f.p3_point()));
    assert_eq!(f.tree.format_tree(), before);
}
