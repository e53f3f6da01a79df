//! Hit-test adapter between the rendering surface and the dock tree.
//!
//! The rendering layer reports its interactive elements once per frame:
//! bounds, stacking order, the dock-tree node each element represents, and
//! the drag-and-drop capability flags attached to it. Queries resolve a
//! screen point to the front-to-back chain of visible elements under it;
//! the frontmost drag source or drop target wins.
//!
//! Queries are pure. The resolved chain is traced for diagnostics, which
//! never affects decisions.

use bitflags::bitflags;

use crate::layout::tree::DockKey;
use crate::utils::{Point, Rect};

bitflags! {
    /// Drag-and-drop participation flags attached to a surface element.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct AreaFlags: u8 {
        /// The element may originate a drag.
        const DRAG_AREA = 1 << 0;
        /// The element may accept a drop.
        const DROP_AREA = 1 << 1;
        /// Per-element enable override for dragging.
        const DRAG_ENABLED = 1 << 2;
        /// Per-element enable override for dropping.
        const DROP_ENABLED = 1 << 3;
    }
}

impl AreaFlags {
    pub fn can_drag(self) -> bool {
        self.contains(AreaFlags::DRAG_AREA | AreaFlags::DRAG_ENABLED)
    }

    pub fn can_drop(self) -> bool {
        self.contains(AreaFlags::DROP_AREA | AreaFlags::DROP_ENABLED)
    }
}

/// One interactive element reported by the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceElement {
    pub rect: Rect,
    /// The dock-tree node this element represents, if any.
    pub node: Option<DockKey>,
    pub flags: AreaFlags,
    pub is_visible: bool,
    /// Transient adorner/overlay elements never take part in hit testing.
    pub is_overlay: bool,
    /// Optional name shown in diagnostic traces.
    pub label: Option<String>,
}

impl SurfaceElement {
    /// A visible element with both enable overrides on and no area flags.
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            node: None,
            flags: AreaFlags::DRAG_ENABLED | AreaFlags::DROP_ENABLED,
            is_visible: true,
            is_overlay: false,
            label: None,
        }
    }

    pub fn with_node(mut self, node: DockKey) -> Self {
        self.node = Some(node);
        self
    }

    pub fn drag_area(mut self) -> Self {
        self.flags |= AreaFlags::DRAG_AREA;
        self
    }

    pub fn drop_area(mut self) -> Self {
        self.flags |= AreaFlags::DROP_AREA;
        self
    }

    pub fn with_flags(mut self, flags: AreaFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn overlay(mut self) -> Self {
        self.is_overlay = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.is_visible = false;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Snapshot of the interactive surface, in paint order (back to front).
#[derive(Debug, Default)]
pub struct HitTestSurface {
    elements: Vec<SurfaceElement>,
}

impl HitTestSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all elements; the rendering layer rebuilds the list per frame.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Append an element on top of everything pushed before it.
    pub fn push(&mut self, element: SurfaceElement) {
        self.elements.push(element);
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Front-to-back chain of visible, non-overlay elements under a point.
    ///
    /// Lazy and restartable; every call recomputes from the current element
    /// list.
    pub fn resolve_at(&self, point: Point) -> impl Iterator<Item = &SurfaceElement> + '_ {
        self.elements
            .iter()
            .rev()
            .filter(move |element| {
                element.is_visible && !element.is_overlay && element.rect.contains(point)
            })
            .inspect(move |element| {
                trace!(
                    "hit chain at ({}, {}): {} flags={:?}",
                    point.x,
                    point.y,
                    element.label.as_deref().unwrap_or("<unnamed>"),
                    element.flags,
                );
            })
    }

    /// Frontmost element under the point that may originate a drag.
    pub fn drag_source_at(&self, point: Point) -> Option<(DockKey, AreaFlags)> {
        self.resolve_at(point)
            .find(|element| element.flags.can_drag())
            .and_then(|element| element.node.map(|node| (node, element.flags)))
    }

    /// Frontmost element under the point that may accept a drop.
    pub fn drop_target_at(&self, point: Point) -> Option<(DockKey, AreaFlags)> {
        self.resolve_at(point)
            .find(|element| element.flags.can_drop())
            .and_then(|element| element.node.map(|node| (node, element.flags)))
    }
}
