//! Active-path reconciliation.
//!
//! When the active leaf changes, only the nodes whose membership in the
//! active path changes get hooks: exits run innermost first, enters run
//! outermost first, and shared ancestors are left alone.

use crate::core::{EventId, StateId, StateIndex, StateTree};

/// Exit/enter plan for moving the active path to a new target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reconciliation {
    /// Root-to-leaf path after the move; empty when stopping.
    pub future_path: Vec<StateIndex>,
    /// Nodes to exit, leaf first.
    pub exiting: Vec<StateIndex>,
    /// Nodes to enter, root first.
    pub entering: Vec<StateIndex>,
}

impl Reconciliation {
    /// Plan the move from `current_path` to `target`.
    ///
    /// The target is first resolved to a leaf by first-child descent. A
    /// `None` target plans a full stop.
    pub fn plan<S: StateId, E: EventId>(
        tree: &StateTree<S, E>,
        current_path: &[StateIndex],
        target: Option<StateIndex>,
    ) -> Self {
        let future_path = target
            .map(|t| tree.ancestry(tree.first_leaf(t)))
            .unwrap_or_default();

        // Both paths are ancestor chains, so nodes common to both form a
        // shared prefix.
        let shared = current_path
            .iter()
            .zip(&future_path)
            .take_while(|(a, b)| a == b)
            .count();

        let exiting = current_path[shared..].iter().rev().copied().collect();
        let entering = future_path[shared..].to_vec();

        Self {
            future_path,
            exiting,
            entering,
        }
    }

    /// True when no hook would fire.
    pub fn is_noop(&self) -> bool {
        self.exiting.is_empty() && self.entering.is_empty()
    }

    pub fn leaf(&self) -> Option<StateIndex> {
        self.future_path.last().copied()
    }
}
