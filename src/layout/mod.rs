//! Dock tree layout and the drag-and-drop mutation engine.
//!
//! The tree is an arena of nodes: docks (containers holding an ordered
//! collection of child dockables) and leaf dockables hosting content. All
//! structural mutation goes through [`factory::Factory`]; the drag-and-drop
//! decision logic lives in [`dnd`].

use quay_config::{Config, CopyInsert};

pub mod dnd;
pub mod factory;
pub mod tree;


/// Content hosted by a leaf dockable.
///
/// The engine treats the content as opaque: it needs an identity for lookup,
/// an optional title for snapshots and diagnostics, and a way to produce an
/// independent duplicate for copy drops.
pub trait DockElement {
    /// Unique identity of the content.
    type Id: PartialEq + Eq + Clone + std::fmt::Debug;

    fn id(&self) -> &Self::Id;

    fn title(&self) -> Option<String> {
        None
    }

    /// An independent duplicate used by copy drops.
    ///
    /// The duplicate must not share mutable state with `self`.
    fn duplicate(&self) -> Self;
}

/// Engine-wide behavior options, lowered from the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Global switch gating gesture starts, independent of per-element flags.
    pub drag_enabled: bool,
    /// Global switch gating drop-target resolution.
    pub drop_enabled: bool,
    /// Where a copy drop inserts the clone relative to the target.
    pub copy_insert: CopyInsert,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            drag_enabled: true,
            drop_enabled: true,
            copy_insert: CopyInsert::Before,
        }
    }
}

impl Options {
    pub fn from_config(config: &Config) -> Self {
        let dnd = &config.drag_and_drop;
        Self {
            drag_enabled: dnd.drag_enabled,
            drop_enabled: dnd.drop_enabled,
            copy_insert: dnd.copy_insert,
        }
    }
}
