//! The factory is the only component allowed to restructure a dock tree.
//!
//! Every operation checks all of its preconditions before touching the tree,
//! so a failed call leaves the tree exactly as it was. A committed operation
//! updates member collections and owner back-references together and
//! activates the dockable that arrived at its new position.

use std::rc::Rc;

use super::tree::{DockKey, DockTree};
use super::{DockElement, Options};
use quay_config::CopyInsert;

#[derive(Debug, Clone)]
pub struct Factory {
    options: Rc<Options>,
}

impl Factory {
    pub fn new(options: Rc<Options>) -> Self {
        Self { options }
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create an empty dock appended to `owner`'s member collection.
    pub fn add_dock<W: DockElement>(
        &self,
        tree: &mut DockTree<W>,
        owner: DockKey,
    ) -> Option<DockKey> {
        tree.dock(owner)?;

        let key = tree.new_dock(owner);
        let dock = tree.dock_mut(owner).unwrap();
        let idx = dock.len();
        dock.insert_child(idx, key);
        dock.set_active_idx(idx);
        log_committed(tree, "add_dock", key);
        Some(key)
    }

    /// Create a leaf dockable appended to `owner`'s member collection.
    pub fn add_dockable<W: DockElement>(
        &self,
        tree: &mut DockTree<W>,
        owner: DockKey,
        content: W,
    ) -> Option<DockKey> {
        tree.dock(owner)?;

        let key = tree.new_dockable(owner, content);
        let dock = tree.dock_mut(owner).unwrap();
        let idx = dock.len();
        dock.insert_child(idx, key);
        dock.set_active_idx(idx);
        log_committed(tree, "add_dockable", key);
        Some(key)
    }

    // ========================================================================
    // Move
    // ========================================================================

    /// Reposition `source` onto `target`'s former position within one dock.
    pub fn move_dockable<W: DockElement>(
        &self,
        tree: &mut DockTree<W>,
        owner: DockKey,
        source: DockKey,
        target: DockKey,
    ) -> bool {
        if source == target {
            return false;
        }
        let Some(dock) = tree.dock(owner) else {
            return false;
        };
        let (Some(source_idx), Some(target_idx)) = (dock.index_of(source), dock.index_of(target))
        else {
            return false;
        };

        let dock = tree.dock_mut(owner).unwrap();
        dock.remove_child(source_idx);
        dock.insert_child(target_idx, source);
        dock.set_active_idx(target_idx);

        debug_assert_eq!(tree.owner_of(source), Some(owner));
        log_committed(tree, "move_dockable", source);
        true
    }

    /// Move `source` out of `source_owner` and insert it immediately before
    /// `target` inside `target_owner`, reassigning the owner back-reference.
    pub fn move_dockable_between<W: DockElement>(
        &self,
        tree: &mut DockTree<W>,
        source_owner: DockKey,
        target_owner: DockKey,
        source: DockKey,
        target: DockKey,
    ) -> bool {
        if source_owner == target_owner || source == target {
            return false;
        }
        let Some(source_idx) = tree.dock(source_owner).and_then(|dock| dock.index_of(source))
        else {
            return false;
        };
        let Some(target_idx) = tree.dock(target_owner).and_then(|dock| dock.index_of(target))
        else {
            return false;
        };
        // Moving a dock into its own subtree would detach that subtree from
        // the root; the membership invariant leaves no legal result.
        if tree.is_ancestor_or_self(source, target_owner) {
            return false;
        }

        tree.dock_mut(source_owner).unwrap().remove_child(source_idx);
        let dock = tree.dock_mut(target_owner).unwrap();
        dock.insert_child(target_idx, source);
        dock.set_active_idx(target_idx);
        tree.set_owner(source, Some(target_owner));

        log_committed(tree, "move_dockable_between", source);
        true
    }

    // ========================================================================
    // Swap
    // ========================================================================

    /// Exchange the positions of two members of one dock.
    pub fn swap_dockable<W: DockElement>(
        &self,
        tree: &mut DockTree<W>,
        owner: DockKey,
        source: DockKey,
        target: DockKey,
    ) -> bool {
        if source == target {
            return false;
        }
        let Some(dock) = tree.dock(owner) else {
            return false;
        };
        let (Some(source_idx), Some(target_idx)) = (dock.index_of(source), dock.index_of(target))
        else {
            return false;
        };

        let dock = tree.dock_mut(owner).unwrap();
        dock.swap_children(source_idx, target_idx);
        dock.set_active_idx(target_idx);

        log_committed(tree, "swap_dockable", source);
        true
    }

    /// Exchange two members across docks; each node takes over the other's
    /// slot and owner.
    pub fn swap_dockable_between<W: DockElement>(
        &self,
        tree: &mut DockTree<W>,
        source_owner: DockKey,
        target_owner: DockKey,
        source: DockKey,
        target: DockKey,
    ) -> bool {
        if source_owner == target_owner || source == target {
            return false;
        }
        let Some(source_idx) = tree.dock(source_owner).and_then(|dock| dock.index_of(source))
        else {
            return false;
        };
        let Some(target_idx) = tree.dock(target_owner).and_then(|dock| dock.index_of(target))
        else {
            return false;
        };
        // Either node sitting on the other's owner chain would make a node a
        // descendant of itself after the exchange.
        if tree.is_ancestor_or_self(source, target_owner)
            || tree.is_ancestor_or_self(target, source_owner)
        {
            return false;
        }

        tree.dock_mut(source_owner).unwrap().replace_child(source_idx, target);
        tree.dock_mut(target_owner).unwrap().replace_child(target_idx, source);
        tree.set_owner(source, Some(target_owner));
        tree.set_owner(target, Some(source_owner));
        tree.dock_mut(source_owner).unwrap().set_active_idx(source_idx);
        tree.dock_mut(target_owner).unwrap().set_active_idx(target_idx);

        log_committed(tree, "swap_dockable_between", source);
        true
    }

    // ========================================================================
    // Clone
    // ========================================================================

    /// Deep-clone the `source` subtree and insert the clone next to `target`
    /// inside `target_owner`. Returns the clone's key.
    ///
    /// The clone gets fresh node ids throughout and duplicated content that
    /// shares no mutable state with the original; the source stays untouched.
    pub fn clone_dockable<W: DockElement>(
        &self,
        tree: &mut DockTree<W>,
        target_owner: DockKey,
        source: DockKey,
        target: DockKey,
    ) -> Option<DockKey> {
        let target_idx = tree.dock(target_owner)?.index_of(target)?;
        tree.get(source)?;

        let clone = tree.clone_subtree(source)?;
        let insert_idx = match self.options.copy_insert {
            CopyInsert::Before => target_idx,
            CopyInsert::After => target_idx + 1,
        };
        let dock = tree.dock_mut(target_owner).unwrap();
        dock.insert_child(insert_idx, clone);
        dock.set_active_idx(insert_idx);
        tree.set_owner(clone, Some(target_owner));

        log_committed(tree, "clone_dockable", clone);
        Some(clone)
    }
}

fn log_committed<W: DockElement>(tree: &DockTree<W>, op: &str, key: DockKey) {
    if let Some(id) = tree.node_id(key) {
        debug!("{op}: committed for node #{}", id.get());
    }
}
