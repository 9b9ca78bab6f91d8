//! Nodes and transitions of the state tree.

use super::guard::{Guard, Hooks};
use super::state::{EventId, StateId};
use std::fmt;

/// Stable handle of a node inside a [`StateTree`](super::StateTree) arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct StateIndex(pub(crate) usize);

impl StateIndex {
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A guarded, optionally event-scoped edge to a destination state.
///
/// A transition matches a presented event iff its event filter equals the
/// presented event exactly and its guard passes. A transition without an
/// event filter therefore only matches ticks where no event is presented.
#[derive(Debug)]
pub struct Transition<E: EventId> {
    pub(crate) destination: StateIndex,
    pub(crate) event: Option<E>,
    pub(crate) guard: Guard,
    pub(crate) description: String,
}

impl<E: EventId> Transition<E> {
    pub fn destination(&self) -> StateIndex {
        self.destination
    }

    pub fn event(&self) -> Option<&E> {
        self.event.as_ref()
    }

    /// Human readable label, e.g. `Idle -> Walk on StartWalking`.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Check the event filter, then the guard.
    pub fn matches(&self, presented: Option<&E>) -> bool {
        self.event.as_ref() == presented && self.guard.check()
    }
}

/// A single state in the hierarchy.
///
/// Parent and children are arena indices; the tree owns every node.
#[derive(Debug)]
pub struct StateNode<S: StateId, E: EventId> {
    pub(crate) id: S,
    pub(crate) parent: Option<StateIndex>,
    pub(crate) children: Vec<StateIndex>,
    pub(crate) transitions: Vec<Transition<E>>,
    pub(crate) hooks: Hooks,
}

impl<S: StateId, E: EventId> StateNode<S, E> {
    pub(crate) fn new(id: S, hooks: Hooks) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            transitions: Vec::new(),
            hooks,
        }
    }

    pub fn id(&self) -> &S {
        &self.id
    }

    pub fn parent(&self) -> Option<StateIndex> {
        self.parent
    }

    pub fn children(&self) -> &[StateIndex] {
        &self.children
    }

    /// Outgoing transitions in priority order.
    pub fn transitions(&self) -> &[Transition<E>] {
        &self.transitions
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// First transition matching `presented`, in priority order.
    pub fn check_transitions(&self, presented: Option<&E>) -> Option<&Transition<E>> {
        self.transitions.iter().find(|t| t.matches(presented))
    }
}
