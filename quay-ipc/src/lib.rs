//! Types for inspecting the quay docking-layout engine.
//!
//! The engine exposes its current structure as a [`DockTreeNode`] snapshot:
//! a plain, serializable tree that renderers and diagnostic tooling can
//! consume without touching the live arena.

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};

/// One node of a dock-tree snapshot.
///
/// Docks carry `active: Some(idx)` and their ordered children; leaf dockables
/// carry `active: None` and no children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockTreeNode {
    /// Stable node id, unique within the tree that produced the snapshot.
    pub id: u64,
    /// Index of the active child for docks, `None` for leaf dockables.
    pub active: Option<usize>,
    /// Title of the hosted content, if the node is a leaf with a title.
    pub title: Option<String>,
    /// Whether the node is currently visible.
    pub is_visible: bool,
    /// Ordered children, empty for leaf dockables.
    pub children: Vec<DockTreeNode>,
}

impl DockTreeNode {
    /// Returns whether this node describes a dock (container).
    pub fn is_dock(&self) -> bool {
        self.active.is_some()
    }

    /// Counts the leaf dockables in this subtree.
    pub fn dockable_count(&self) -> usize {
        if self.children.is_empty() && !self.is_dock() {
            return 1;
        }
        self.children.iter().map(Self::dockable_count).sum()
    }

    /// Depth-first search for a node by id.
    pub fn find(&self, id: u64) -> Option<&DockTreeNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DockTreeNode {
        DockTreeNode {
            id: 0,
            active: Some(1),
            title: None,
            is_visible: true,
            children: vec![
                DockTreeNode {
                    id: 1,
                    active: None,
                    title: Some("terminal".to_owned()),
                    is_visible: true,
                    children: Vec::new(),
                },
                DockTreeNode {
                    id: 2,
                    active: None,
                    title: None,
                    is_visible: false,
                    children: Vec::new(),
                },
            ],
        }
    }

    #[test]
    fn counts_and_lookup() {
        let snapshot = sample();
        assert!(snapshot.is_dock());
        assert_eq!(snapshot.dockable_count(), 2);
        assert_eq!(
            snapshot.find(1).and_then(|node| node.title.as_deref()),
            Some("terminal")
        );
        assert!(snapshot.find(7).is_none());
    }

    #[test]
    fn serializes_to_stable_json() {
        let snapshot = sample();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: DockTreeNode = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
        assert!(json.contains("\"active\":1"));
    }
}
