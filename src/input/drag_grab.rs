//! Drag gesture lifecycle.
//!
//! A grab starts on pointer-down over a drag area, is revalidated on every
//! pointer move while the gesture is in flight, and is consumed by at most
//! one execute on pointer-up. Losing pointer capture cancels the grab with
//! no tree mutation; validation never mutates, so there is nothing to clean
//! up.

use std::rc::Rc;

use crate::hit_test::HitTestSurface;
use crate::layout::dnd::{DragContext, DragEffect, DropHandler};
use crate::layout::factory::Factory;
use crate::layout::tree::{DockKey, DockTree};
use crate::layout::{DockElement, Options};
use crate::utils::Point;

/// Transient state of one drag gesture.
///
/// Created on pointer-down, discarded on drop or capture loss.
#[derive(Debug, Clone)]
pub struct DragGrab {
    source: DockKey,
    origin: Point,
    position: Point,
    effect: DragEffect,
    target: Option<DockKey>,
    valid: bool,
}

impl DragGrab {
    pub fn source(&self) -> DockKey {
        self.source
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn effect(&self) -> DragEffect {
        self.effect
    }

    /// Current candidate drop target, if the pointer is over one.
    pub fn target(&self) -> Option<DockKey> {
        self.target
    }

    /// Verdict of the latest validation; drives drop-indicator feedback.
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Drives drag gestures against a tree and a hit-test surface.
#[derive(Debug)]
pub struct DragController {
    options: Rc<Options>,
    handler: DropHandler,
    grab: Option<DragGrab>,
}

impl DragController {
    pub fn new(options: Rc<Options>) -> Self {
        let factory = Factory::new(options.clone());
        Self {
            options,
            handler: DropHandler::new(factory),
            grab: None,
        }
    }

    pub fn grab(&self) -> Option<&DragGrab> {
        self.grab.as_ref()
    }

    pub fn handler(&self) -> &DropHandler {
        &self.handler
    }

    /// Pointer-down: start a grab if the frontmost element under the pointer
    /// is a drag area mapping to a node. Returns whether a grab started.
    pub fn on_pointer_down<W: DockElement>(
        &mut self,
        tree: &DockTree<W>,
        surface: &HitTestSurface,
        position: Point,
    ) -> bool {
        if self.grab.is_some() {
            return false;
        }
        if !self.options.drag_enabled {
            return false;
        }
        let Some((source, _flags)) = surface.drag_source_at(position) else {
            return false;
        };
        if !tree.contains(source) {
            return false;
        }

        trace!("drag grab started on node {source:?}");
        self.grab = Some(DragGrab {
            source,
            origin: position,
            position,
            effect: DragEffect::None,
            target: None,
            valid: false,
        });
        true
    }

    /// Pointer-move: update the gesture and revalidate against the current
    /// candidate target. Returns the validation verdict for cursor feedback.
    pub fn on_pointer_move<W: DockElement>(
        &mut self,
        tree: &DockTree<W>,
        surface: &HitTestSurface,
        position: Point,
        effect: DragEffect,
    ) -> bool {
        let target = self.resolve_target(surface, position);
        let Some(grab) = &mut self.grab else {
            return false;
        };

        grab.position = position;
        grab.effect = effect;
        grab.target = target;

        grab.valid = self.handler.validate(
            tree,
            DragContext::Dockable(grab.source),
            DragContext::from(grab.target),
            position,
            effect,
        );
        grab.valid
    }

    /// Pointer-up: execute at most once, then discard the gesture. Returns
    /// whether a mutation was committed.
    pub fn on_pointer_up<W: DockElement>(
        &mut self,
        tree: &mut DockTree<W>,
        surface: &HitTestSurface,
        position: Point,
    ) -> bool {
        let target = self.resolve_target(surface, position);
        let Some(grab) = self.grab.take() else {
            return false;
        };

        self.handler.execute(
            tree,
            DragContext::Dockable(grab.source),
            DragContext::from(target),
            position,
            grab.effect,
        )
    }

    /// Pointer capture lost: abort with no mutation.
    pub fn on_capture_lost(&mut self) {
        if self.grab.take().is_some() {
            trace!("drag grab cancelled");
        }
        self.handler.reset();
    }

    fn resolve_target(&self, surface: &HitTestSurface, position: Point) -> Option<DockKey> {
        if !self.options.drop_enabled {
            return None;
        }
        surface.drop_target_at(position).map(|(node, _flags)| node)
    }
}
