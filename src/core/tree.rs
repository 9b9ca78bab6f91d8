//! Arena-backed state hierarchy.
//!
//! The tree is produced once by [`HfsmBuilder::build`](crate::HfsmBuilder::build)
//! and its topology never changes afterwards. Only the hooks stored in the
//! nodes are touched mutably, by the engine that owns the tree.

use super::node::{StateIndex, StateNode};
use super::state::{EventId, StateId};
use std::collections::HashMap;

/// Fully linked graph of states plus the designated initial state.
#[derive(Debug)]
pub struct StateTree<S: StateId, E: EventId> {
    nodes: Vec<StateNode<S, E>>,
    index: HashMap<S, StateIndex>,
    initial: StateIndex,
}

impl<S: StateId, E: EventId> StateTree<S, E> {
    /// Assemble a tree from already linked nodes.
    ///
    /// Callers guarantee that every parent/child/destination index is in
    /// bounds and that parent chains are acyclic.
    pub(crate) fn from_linked(nodes: Vec<StateNode<S, E>>, initial: StateIndex) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.clone(), StateIndex(i)))
            .collect();
        Self {
            nodes,
            index,
            initial,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The first root-level state registered.
    pub fn initial(&self) -> StateIndex {
        self.initial
    }

    pub fn index_of(&self, id: &S) -> Option<StateIndex> {
        self.index.get(id).copied()
    }

    pub fn node(&self, index: StateIndex) -> &StateNode<S, E> {
        &self.nodes[index.0]
    }

    pub(crate) fn node_mut(&mut self, index: StateIndex) -> &mut StateNode<S, E> {
        &mut self.nodes[index.0]
    }

    pub fn get(&self, id: &S) -> Option<&StateNode<S, E>> {
        self.index_of(id).map(|i| self.node(i))
    }

    pub fn id(&self, index: StateIndex) -> &S {
        &self.node(index).id
    }

    pub fn contains(&self, id: &S) -> bool {
        self.index.contains_key(id)
    }

    pub fn parent_of(&self, id: &S) -> Option<&S> {
        let node = self.get(id)?;
        node.parent.map(|p| self.id(p))
    }

    pub fn children_of(&self, id: &S) -> Vec<&S> {
        self.get(id)
            .map(|node| node.children.iter().map(|&c| self.id(c)).collect())
            .unwrap_or_default()
    }

    /// Root-level states in registration order.
    pub fn roots(&self) -> impl Iterator<Item = &S> + '_ {
        self.nodes.iter().filter(|n| n.is_root()).map(|n| &n.id)
    }

    pub fn is_leaf(&self, index: StateIndex) -> bool {
        self.node(index).is_leaf()
    }

    /// Follow first children from `index` until a childless node is reached.
    pub fn first_leaf(&self, index: StateIndex) -> StateIndex {
        let mut current = index;
        while let Some(&first) = self.node(current).children.first() {
            current = first;
        }
        current
    }

    /// Ancestor chain of `index`, root first, `index` last.
    pub fn ancestry(&self, index: StateIndex) -> Vec<StateIndex> {
        let mut chain = vec![index];
        let mut current = index;
        while let Some(parent) = self.node(current).parent {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    /// Destination of the first transition on `index` matching `presented`.
    pub fn check_transitions(
        &self,
        index: StateIndex,
        presented: Option<&E>,
    ) -> Option<StateIndex> {
        self.node(index)
            .check_transitions(presented)
            .map(|t| t.destination)
    }
}
