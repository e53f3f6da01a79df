//! Dock tree model.
//!
//! Nodes live in a slotmap arena. A node is either a dock (a container with
//! an ordered collection of visible children and an active child) or a leaf
//! dockable hosting content. Children hold a non-owning back-reference to
//! their owner; the owner's member collection is the authoritative ownership
//! relation.
//!
//! Structural invariants:
//! - every member's owner back-reference equals the dock listing it;
//! - a node appears in exactly one member collection (the root in none);
//! - a dock's active index is in range whenever it has children.
//!
//! Only [`super::factory::Factory`] may restructure the tree; the mutating
//! methods here are crate-private.

use std::fmt::Write as _;

use slotmap::{new_key_type, SlotMap};

use super::DockElement;
use quay_ipc::DockTreeNode;

new_key_type! {
    /// Key to reference a node in the dock tree.
    pub struct DockKey;
}

/// Stable node identity, unique within one tree.
///
/// Unlike [`DockKey`], ids are never reused and survive into snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Node stored in the arena.
#[derive(Debug)]
pub enum NodeData<W: DockElement> {
    /// Dock: a container with an ordered collection of child dockables.
    Dock(DockData),
    /// Leaf dockable hosting content.
    Dockable(DockableData<W>),
}

#[derive(Debug)]
pub struct DockData {
    id: NodeId,
    owner: Option<DockKey>,
    is_visible: bool,
    /// Ordered member collection; order is meaningful for visual placement.
    visible: Vec<DockKey>,
    /// Index of the active (selected) child.
    active_idx: usize,
}

#[derive(Debug)]
pub struct DockableData<W: DockElement> {
    id: NodeId,
    owner: Option<DockKey>,
    is_visible: bool,
    content: W,
}

// ============================================================================
// DockData
// ============================================================================

impl DockData {
    fn new(id: NodeId, owner: Option<DockKey>) -> Self {
        Self {
            id,
            owner,
            is_visible: true,
            visible: Vec::new(),
            active_idx: 0,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Ordered member collection.
    pub fn visible(&self) -> &[DockKey] {
        &self.visible
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn active_idx(&self) -> usize {
        self.active_idx
    }

    /// Get the active child key.
    pub fn active_child(&self) -> Option<DockKey> {
        self.visible.get(self.active_idx).copied()
    }

    /// Index of a member, if present.
    pub fn index_of(&self, key: DockKey) -> Option<usize> {
        self.visible.iter().position(|&member| member == key)
    }

    pub(crate) fn set_active_idx(&mut self, idx: usize) {
        if idx < self.visible.len() {
            self.active_idx = idx;
        }
    }

    /// Insert a child at index (clamped to the collection length).
    pub(crate) fn insert_child(&mut self, idx: usize, key: DockKey) {
        let idx = idx.min(self.visible.len());
        self.visible.insert(idx, key);
        if self.active_idx >= idx && self.visible.len() > 1 {
            self.active_idx = (self.active_idx + 1).min(self.visible.len() - 1);
        }
    }

    /// Remove the child at index, returning its key.
    pub(crate) fn remove_child(&mut self, idx: usize) -> Option<DockKey> {
        if idx >= self.visible.len() {
            return None;
        }

        let key = self.visible.remove(idx);

        // Keep the active index on the same child where possible.
        if self.active_idx > idx {
            self.active_idx -= 1;
        }
        if self.active_idx >= self.visible.len() && self.active_idx > 0 {
            self.active_idx = self.visible.len() - 1;
        }

        Some(key)
    }

    pub(crate) fn swap_children(&mut self, a: usize, b: usize) {
        self.visible.swap(a, b);
    }

    pub(crate) fn replace_child(&mut self, idx: usize, key: DockKey) -> Option<DockKey> {
        let slot = self.visible.get_mut(idx)?;
        Some(std::mem::replace(slot, key))
    }
}

// ============================================================================
// DockableData
// ============================================================================

impl<W: DockElement> DockableData<W> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn content(&self) -> &W {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut W {
        &mut self.content
    }
}

// ============================================================================
// DockTree
// ============================================================================

/// The dock tree: arena of nodes plus the root dock.
#[derive(Debug)]
pub struct DockTree<W: DockElement> {
    nodes: SlotMap<DockKey, NodeData<W>>,
    root: DockKey,
    next_id: u64,
}

impl<W: DockElement> DockTree<W> {
    /// Create a tree holding a single empty root dock.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeData::Dock(DockData::new(NodeId(0), None)));
        Self {
            nodes,
            root,
            next_id: 1,
        }
    }

    fn alloc_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// The root dock. It has no owner and is never a drag endpoint.
    pub fn root(&self) -> DockKey {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn get(&self, key: DockKey) -> Option<&NodeData<W>> {
        self.nodes.get(key)
    }

    /// Get dock data by key.
    pub fn dock(&self, key: DockKey) -> Option<&DockData> {
        match self.nodes.get(key)? {
            NodeData::Dock(dock) => Some(dock),
            _ => None,
        }
    }

    pub(crate) fn dock_mut(&mut self, key: DockKey) -> Option<&mut DockData> {
        match self.nodes.get_mut(key)? {
            NodeData::Dock(dock) => Some(dock),
            _ => None,
        }
    }

    /// Get leaf data by key.
    pub fn dockable(&self, key: DockKey) -> Option<&DockableData<W>> {
        match self.nodes.get(key)? {
            NodeData::Dockable(dockable) => Some(dockable),
            _ => None,
        }
    }

    pub fn dockable_mut(&mut self, key: DockKey) -> Option<&mut DockableData<W>> {
        match self.nodes.get_mut(key)? {
            NodeData::Dockable(dockable) => Some(dockable),
            _ => None,
        }
    }

    pub fn contains(&self, key: DockKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Owner back-reference of a node. `None` for the root or unknown keys.
    pub fn owner_of(&self, key: DockKey) -> Option<DockKey> {
        match self.nodes.get(key)? {
            NodeData::Dock(dock) => dock.owner,
            NodeData::Dockable(dockable) => dockable.owner,
        }
    }

    pub fn node_id(&self, key: DockKey) -> Option<NodeId> {
        match self.nodes.get(key)? {
            NodeData::Dock(dock) => Some(dock.id),
            NodeData::Dockable(dockable) => Some(dockable.id),
        }
    }

    pub fn is_visible(&self, key: DockKey) -> bool {
        match self.nodes.get(key) {
            Some(NodeData::Dock(dock)) => dock.is_visible,
            Some(NodeData::Dockable(dockable)) => dockable.is_visible,
            None => false,
        }
    }

    pub fn set_visible(&mut self, key: DockKey, value: bool) -> bool {
        match self.nodes.get_mut(key) {
            Some(NodeData::Dock(dock)) => {
                dock.is_visible = value;
                true
            }
            Some(NodeData::Dockable(dockable)) => {
                dockable.is_visible = value;
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_owner(&mut self, key: DockKey, owner: Option<DockKey>) -> bool {
        match self.nodes.get_mut(key) {
            Some(NodeData::Dock(dock)) => {
                dock.owner = owner;
                true
            }
            Some(NodeData::Dockable(dockable)) => {
                dockable.owner = owner;
                true
            }
            None => false,
        }
    }

    /// Index of `key` within its owner's member collection.
    pub fn index_in_owner(&self, key: DockKey) -> Option<(DockKey, usize)> {
        let owner = self.owner_of(key)?;
        let idx = self.dock(owner)?.index_of(key)?;
        Some((owner, idx))
    }

    /// Whether `ancestor` lies on the owner chain of `key` (or is `key`).
    pub fn is_ancestor_or_self(&self, ancestor: DockKey, key: DockKey) -> bool {
        let mut current = Some(key);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.owner_of(node);
        }
        false
    }

    /// Find a leaf dockable by content identity.
    pub fn find_dockable(&self, id: &W::Id) -> Option<DockKey> {
        self.nodes_depth_first()
            .into_iter()
            .find(|&key| match self.nodes.get(key) {
                Some(NodeData::Dockable(dockable)) => dockable.content.id() == id,
                _ => false,
            })
    }

    /// All node keys in depth-first order starting at the root.
    pub fn nodes_depth_first(&self) -> Vec<DockKey> {
        let mut keys = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(key) = stack.pop() {
            keys.push(key);
            if let Some(NodeData::Dock(dock)) = self.nodes.get(key) {
                stack.extend(dock.visible.iter().rev().copied());
            }
        }
        keys
    }

    /// Iterate over all leaf dockables.
    pub fn dockables(&self) -> impl Iterator<Item = (DockKey, &W)> + '_ {
        self.nodes.iter().filter_map(|(key, node)| match node {
            NodeData::Dockable(dockable) => Some((key, &dockable.content)),
            NodeData::Dock(_) => None,
        })
    }

    // ========================================================================
    // Crate-private construction and restructuring (used by the Factory)
    // ========================================================================

    pub(crate) fn new_dock(&mut self, owner: DockKey) -> DockKey {
        let id = self.alloc_id();
        self.nodes.insert(NodeData::Dock(DockData::new(id, Some(owner))))
    }

    pub(crate) fn new_dockable(&mut self, owner: DockKey, content: W) -> DockKey {
        let id = self.alloc_id();
        self.nodes.insert(NodeData::Dockable(DockableData {
            id,
            owner: Some(owner),
            is_visible: true,
            content,
        }))
    }

    /// Deep-clone a subtree into the arena with fresh ids.
    ///
    /// The returned clone root has no owner yet; the caller wires it into a
    /// member collection.
    pub(crate) fn clone_subtree(&mut self, key: DockKey) -> Option<DockKey> {
        enum Proto<W> {
            Dockable { content: W, is_visible: bool },
            Dock {
                children: Vec<DockKey>,
                active_idx: usize,
                is_visible: bool,
            },
        }

        let proto = match self.nodes.get(key)? {
            NodeData::Dockable(dockable) => Proto::Dockable {
                content: dockable.content.duplicate(),
                is_visible: dockable.is_visible,
            },
            NodeData::Dock(dock) => Proto::Dock {
                children: dock.visible.clone(),
                active_idx: dock.active_idx,
                is_visible: dock.is_visible,
            },
        };

        match proto {
            Proto::Dockable { content, is_visible } => {
                let id = self.alloc_id();
                Some(self.nodes.insert(NodeData::Dockable(DockableData {
                    id,
                    owner: None,
                    is_visible,
                    content,
                })))
            }
            Proto::Dock {
                children,
                active_idx,
                is_visible,
            } => {
                let mut cloned = Vec::with_capacity(children.len());
                for child in children {
                    cloned.push(self.clone_subtree(child)?);
                }
                let id = self.alloc_id();
                let dock_key = self.nodes.insert(NodeData::Dock(DockData {
                    id,
                    owner: None,
                    is_visible,
                    visible: cloned.clone(),
                    active_idx,
                }));
                for child in cloned {
                    self.set_owner(child, Some(dock_key));
                }
                Some(dock_key)
            }
        }
    }

    // ========================================================================
    // Snapshots and diagnostics
    // ========================================================================

    /// Serializable snapshot of the whole tree.
    pub fn snapshot(&self) -> DockTreeNode {
        self.snapshot_node(self.root)
    }

    fn snapshot_node(&self, key: DockKey) -> DockTreeNode {
        match self.nodes.get(key) {
            Some(NodeData::Dock(dock)) => DockTreeNode {
                id: dock.id.get(),
                active: Some(dock.active_idx),
                title: None,
                is_visible: dock.is_visible,
                children: dock
                    .visible
                    .iter()
                    .map(|&child| self.snapshot_node(child))
                    .collect(),
            },
            Some(NodeData::Dockable(dockable)) => DockTreeNode {
                id: dockable.id.get(),
                active: None,
                title: dockable.content.title(),
                is_visible: dockable.is_visible,
                children: Vec::new(),
            },
            None => DockTreeNode {
                id: u64::MAX,
                active: None,
                title: None,
                is_visible: false,
                children: Vec::new(),
            },
        }
    }

    /// Human-readable tree dump for diagnostics and snapshot tests.
    pub fn format_tree(&self) -> String {
        let mut out = String::new();
        self.format_node(&mut out, self.root, 0);
        out
    }

    fn format_node(&self, out: &mut String, key: DockKey, depth: usize) {
        let indent = "  ".repeat(depth);
        match self.nodes.get(key) {
            Some(NodeData::Dock(dock)) => {
                let hidden = if dock.is_visible { "" } else { " hidden" };
                let _ = writeln!(out, "{indent}dock #{} active={}{hidden}", dock.id.get(), dock.active_idx);
                for &child in &dock.visible {
                    self.format_node(out, child, depth + 1);
                }
            }
            Some(NodeData::Dockable(dockable)) => {
                let hidden = if dockable.is_visible { "" } else { " hidden" };
                match dockable.content.title() {
                    Some(title) => {
                        let _ = writeln!(out, "{indent}dockable #{} \"{title}\"{hidden}", dockable.id.get());
                    }
                    None => {
                        let _ = writeln!(out, "{indent}dockable #{}{hidden}", dockable.id.get());
                    }
                }
            }
            None => {
                let _ = writeln!(out, "{indent}(missing)");
            }
        }
    }

    /// Assert the structural invariants. Panics on violation.
    ///
    /// Cheap enough to run after every mutation in tests; a violation means
    /// something other than the factory restructured the tree.
    pub fn verify_invariants(&self) {
        assert!(self.nodes.contains_key(self.root), "root missing from arena");
        assert!(
            matches!(self.nodes.get(self.root), Some(NodeData::Dock(_))),
            "root must be a dock"
        );
        assert_eq!(self.owner_of(self.root), None, "root must have no owner");

        let mut seen = std::collections::HashMap::new();
        for key in self.nodes_depth_first() {
            let node = self.nodes.get(key).expect("reachable node missing from arena");
            if let NodeData::Dock(dock) = node {
                if !dock.visible.is_empty() {
                    assert!(
                        dock.active_idx < dock.visible.len(),
                        "active index out of range"
                    );
                }
                for &member in &dock.visible {
                    assert_eq!(
                        self.owner_of(member),
                        Some(key),
                        "member owner back-reference does not match its dock"
                    );
                    let prev = seen.insert(member, key);
                    assert!(
                        prev.is_none(),
                        "node is a member of more than one collection"
                    );
                }
            }
        }

        // Every arena node except the root must be reachable through exactly
        // one membership.
        for (key, _) in self.nodes.iter() {
            if key == self.root {
                continue;
            }
            assert!(
                seen.contains_key(&key),
                "arena node not a member of any collection"
            );
        }
    }
}
