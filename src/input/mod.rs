//! Pointer gesture plumbing for drag-and-drop.

mod drag_grab;

pub use drag_grab::{DragController, DragGrab};
