//! Drag-and-drop decision engine.
//!
//! One pure decision procedure maps a (source, target, effect) triple to a
//! [`DropOperation`] describing the intended tree mutation. Validation
//! decides and discards; execution decides and applies through the factory.
//! Both paths share the decision, so "would execute succeed" and "execute"
//! can never disagree.

use std::cell::Cell;

use super::factory::Factory;
use super::tree::{DockKey, DockTree};
use super::DockElement;
use crate::utils::Point;

/// Requested effect of a drag gesture.
///
/// `None` is the recognized-but-unsupported value: gestures carrying it (or
/// anything the input layer could not map to copy/move/link) are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragEffect {
    #[default]
    None,
    Copy,
    Move,
    Link,
}

/// Typed gesture endpoint, as resolved by hit testing.
///
/// Drag payloads that do not map to a dock-tree node resolve to `Other` and
/// are rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragContext {
    Dockable(DockKey),
    Other,
}

impl From<Option<DockKey>> for DragContext {
    fn from(key: Option<DockKey>) -> Self {
        match key {
            Some(key) => DragContext::Dockable(key),
            None => DragContext::Other,
        }
    }
}

/// The mutation a drop decision resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOperation {
    /// Illegal or empty drop; nothing to do.
    NoOp,
    Move {
        source_owner: DockKey,
        target_owner: DockKey,
        source: DockKey,
        target: DockKey,
    },
    Swap {
        source_owner: DockKey,
        target_owner: DockKey,
        source: DockKey,
        target: DockKey,
    },
    Clone {
        target_owner: DockKey,
        source: DockKey,
        target: DockKey,
    },
}

impl DropOperation {
    pub fn is_noop(&self) -> bool {
        matches!(self, DropOperation::NoOp)
    }
}

/// Coarse handler phase, for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropPhase {
    #[default]
    Idle,
    Validating,
    Executing,
}

/// Decides drop legality and commits the resulting mutation.
#[derive(Debug)]
pub struct DropHandler {
    factory: Factory,
    phase: Cell<DropPhase>,
}

impl DropHandler {
    pub fn new(factory: Factory) -> Self {
        Self {
            factory,
            phase: Cell::new(DropPhase::Idle),
        }
    }

    /// Last observed phase; `Validating` while a gesture hovers, `Idle` after
    /// it ends.
    pub fn phase(&self) -> DropPhase {
        self.phase.get()
    }

    /// Forget the in-flight gesture (capture loss). Never mutates the tree.
    pub fn reset(&self) {
        self.phase.set(DropPhase::Idle);
    }

    /// Side-effect-free check: would [`Self::execute`] succeed right now?
    pub fn validate<W: DockElement>(
        &self,
        tree: &DockTree<W>,
        source: DragContext,
        target: DragContext,
        position: Point,
        effect: DragEffect,
    ) -> bool {
        self.phase.set(DropPhase::Validating);
        let operation = self.decide(tree, source, target, effect);
        trace!("validate at ({}, {}): {operation:?}", position.x, position.y);
        !operation.is_noop()
    }

    /// Decide exactly as [`Self::validate`] does and, if the drop is legal,
    /// commit the mutation. Returns whether anything was committed.
    pub fn execute<W: DockElement>(
        &self,
        tree: &mut DockTree<W>,
        source: DragContext,
        target: DragContext,
        position: Point,
        effect: DragEffect,
    ) -> bool {
        self.phase.set(DropPhase::Executing);
        let operation = self.decide(tree, source, target, effect);
        trace!("execute at ({}, {}): {operation:?}", position.x, position.y);

        let committed = self.apply(tree, operation);
        self.phase.set(DropPhase::Idle);
        committed
    }

    /// The shared decision procedure. Pure: never touches the tree.
    pub fn decide<W: DockElement>(
        &self,
        tree: &DockTree<W>,
        source: DragContext,
        target: DragContext,
        effect: DragEffect,
    ) -> DropOperation {
        let (DragContext::Dockable(source), DragContext::Dockable(target)) = (source, target)
        else {
            return DropOperation::NoOp;
        };

        // A node cannot be dropped onto itself.
        if source == target {
            return DropOperation::NoOp;
        }

        // Both endpoints need an owner; roots are not drag endpoints.
        let Some(source_owner) = tree.owner_of(source) else {
            return DropOperation::NoOp;
        };
        let Some(target_owner) = tree.owner_of(target) else {
            return DropOperation::NoOp;
        };

        match effect {
            DragEffect::Copy => DropOperation::Clone {
                target_owner,
                source,
                target,
            },
            DragEffect::Move => {
                // A dock cannot move into its own subtree.
                if source_owner != target_owner && tree.is_ancestor_or_self(source, target_owner) {
                    return DropOperation::NoOp;
                }
                DropOperation::Move {
                    source_owner,
                    target_owner,
                    source,
                    target,
                }
            }
            DragEffect::Link => {
                if source_owner != target_owner
                    && (tree.is_ancestor_or_self(source, target_owner)
                        || tree.is_ancestor_or_self(target, source_owner))
                {
                    return DropOperation::NoOp;
                }
                DropOperation::Swap {
                    source_owner,
                    target_owner,
                    source,
                    target,
                }
            }
            DragEffect::None => DropOperation::NoOp,
        }
    }

    fn apply<W: DockElement>(&self, tree: &mut DockTree<W>, operation: DropOperation) -> bool {
        match operation {
            DropOperation::NoOp => false,
            DropOperation::Move {
                source_owner,
                target_owner,
                source,
                target,
            } => {
                if source_owner == target_owner {
                    self.factory.move_dockable(tree, source_owner, source, target)
                } else {
                    self.factory
                        .move_dockable_between(tree, source_owner, target_owner, source, target)
                }
            }
            DropOperation::Swap {
                source_owner,
                target_owner,
                source,
                target,
            } => {
                if source_owner == target_owner {
                    self.factory.swap_dockable(tree, source_owner, source, target)
                } else {
                    self.factory
                        .swap_dockable_between(tree, source_owner, target_owner, source, target)
                }
            }
            DropOperation::Clone {
                target_owner,
                source,
                target,
            } => self
                .factory
                .clone_dockable(tree, target_owner, source, target)
                .is_some(),
        }
    }
}
