//! Quay is a drag-and-drop docking layout engine.
//!
//! It maintains a tree of dockable panes and restructures it in response to
//! drag-and-drop gestures. The pieces, bottom to top:
//!
//! - [`layout::tree::DockTree`]: the dock tree model, docks (containers with
//!   an ordered collection of visible children) and dockables (leaves hosting
//!   content).
//! - [`layout::factory::Factory`]: the sole mutation gateway, moving, swapping
//!   and cloning dockables between docks atomically.
//! - [`layout::dnd::DropHandler`]: decides whether a drop is legal and which
//!   mutation it maps to, identically for validation and execution.
//! - [`hit_test::HitTestSurface`]: resolves a screen point to the frontmost
//!   drag source or drop target reported by the rendering layer.
//! - [`input::DragController`]: the gesture lifecycle of pointer down, move,
//!   up, capture loss.
//!
//! Rendering, raw input decoding and layout persistence are left to the
//! embedding application.

#[macro_use]
extern crate tracing;

pub mod hit_test;
pub mod input;
pub mod layout;
pub mod utils;

pub use crate::hit_test::{AreaFlags, HitTestSurface, SurfaceElement};
pub use crate::input::{DragController, DragGrab};
pub use crate::layout::dnd::{DragContext, DragEffect, DropHandler, DropOperation, DropPhase};
pub use crate::layout::factory::Factory;
pub use crate::layout::tree::{DockKey, DockTree, NodeId};
pub use crate::layout::{DockElement, Options};
pub use crate::utils::{Point, Rect, Size};

#[cfg(test)]
mod tests;
