//! Builder for constructing hierarchical state machines.

use crate::builder::error::{BuildError, BuildWarning, Endpoint};
use crate::builder::state::StateBuilder;
use crate::builder::transition::TransitionBuilder;
use crate::core::{EventId, StateId, StateIndex, StateNode, StateTree, Transition};
use crate::engine::{Hfsm, HfsmConfig};
use std::collections::{HashMap, HashSet};

/// Accumulates state and transition descriptors, then freezes them into an
/// [`Hfsm`] with [`build`](Self::build).
///
/// Registration methods take `&mut self` and return `Result<&mut Self, _>`,
/// so a rejected registration leaves the builder usable and calls chain with
/// `?`.
///
/// # Example
///
/// ```rust
/// use hfsm::{BuildError, HfsmBuilder};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Input { Go }
///
/// # fn main() -> Result<(), BuildError> {
/// let mut builder = HfsmBuilder::<&'static str, Input>::new();
/// builder
///     .state("Root")?
///     .child("Idle", "Root")?
///     .child("Walk", "Root")?
///     .transition_on("Idle", "Walk", Input::Go);
///
/// let mut machine = builder.build()?;
/// machine.start();
/// assert_eq!(machine.dotted_path(), "Root.Idle");
/// # Ok(())
/// # }
/// ```
pub struct HfsmBuilder<S: StateId, E: EventId> {
    states: Vec<StateBuilder<S>>,
    registered: HashSet<S>,
    transitions: Vec<TransitionBuilder<S, E>>,
    config: HfsmConfig,
}

impl<S: StateId, E: EventId> HfsmBuilder<S, E> {
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            registered: HashSet::new(),
            transitions: Vec::new(),
            config: HfsmConfig::default(),
        }
    }

    /// Register a state.
    ///
    /// Returns [`BuildError::DuplicateState`] if the id was already
    /// registered. The first state registered without a parent becomes the
    /// initial state.
    pub fn add_state(&mut self, state: StateBuilder<S>) -> Result<&mut Self, BuildError> {
        if !self.registered.insert(state.id.clone()) {
            return Err(BuildError::DuplicateState {
                name: state.id.name().to_string(),
            });
        }
        self.states.push(state);
        Ok(self)
    }

    /// Register a state without hooks and without a parent.
    pub fn state(&mut self, id: S) -> Result<&mut Self, BuildError> {
        self.add_state(StateBuilder::new(id))
    }

    /// Register a state without hooks nested under `parent`.
    pub fn child(&mut self, id: S, parent: S) -> Result<&mut Self, BuildError> {
        self.add_state(StateBuilder::new(id).parent(parent))
    }

    /// Store a transition descriptor. Registration order is priority order.
    pub fn add_transition(&mut self, transition: TransitionBuilder<S, E>) -> &mut Self {
        self.transitions.push(transition);
        self
    }

    /// Unguarded transition that fires on event-less ticks.
    pub fn transition(&mut self, from: S, to: S) -> &mut Self {
        self.add_transition(TransitionBuilder::new(from, to))
    }

    /// Transition that fires when `event` is presented.
    pub fn transition_on(&mut self, from: S, to: S, event: E) -> &mut Self {
        self.add_transition(TransitionBuilder::new(from, to).on_event(event))
    }

    /// Guarded transition that fires on event-less ticks.
    pub fn transition_when<F>(&mut self, from: S, to: S, predicate: F) -> &mut Self
    where
        F: Fn() -> bool + 'static,
    {
        self.add_transition(TransitionBuilder::new(from, to).when(predicate))
    }

    pub fn config(&mut self, config: HfsmConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// Link the hierarchy, attach transitions and produce the engine.
    ///
    /// Transitions naming an unknown state are dropped and reported as
    /// [`BuildWarning`]s, logged and available from [`Hfsm::warnings`].
    pub fn build(self) -> Result<Hfsm<S, E>, BuildError> {
        let index: HashMap<S, StateIndex> = self
            .states
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), StateIndex(i)))
            .collect();

        let mut parents = Vec::with_capacity(self.states.len());
        let mut nodes = Vec::with_capacity(self.states.len());
        for state in self.states {
            let parent = match &state.parent {
                Some(parent) => {
                    let found = index.get(parent).ok_or_else(|| BuildError::UnknownParent {
                        state: state.id.name().to_string(),
                        parent: parent.name().to_string(),
                    })?;
                    Some(*found)
                }
                None => None,
            };
            parents.push(parent);
            let id = state.id.clone();
            nodes.push(StateNode::new(id, state.into_hooks()));
        }

        for (i, parent) in parents.iter().enumerate() {
            if let Some(p) = *parent {
                nodes[i].parent = Some(p);
                nodes[p.0].children.push(StateIndex(i));
            }
        }
        detect_cycles(&nodes)?;

        let mut warnings = Vec::new();
        for descriptor in self.transitions {
            let description = descriptor.description();
            let resolved = match (index.get(&descriptor.from), index.get(&descriptor.to)) {
                (Some(&from), Some(&to)) => Ok((from, to)),
                (None, _) => Err((Endpoint::From, descriptor.from.name().to_string())),
                (_, None) => Err((Endpoint::To, descriptor.to.name().to_string())),
            };
            match resolved {
                Ok((from, to)) => nodes[from.0].transitions.push(Transition {
                    destination: to,
                    event: descriptor.event,
                    guard: descriptor.guard.unwrap_or_default(),
                    description,
                }),
                Err((endpoint, state)) => {
                    tracing::warn!(
                        transition = %description,
                        ?endpoint,
                        %state,
                        "Dropping transition with unresolved endpoint"
                    );
                    warnings.push(BuildWarning::UnresolvedTransitionEndpoint {
                        description,
                        endpoint,
                        state,
                    });
                }
            }
        }

        let initial = nodes
            .iter()
            .position(StateNode::is_root)
            .map(StateIndex)
            .ok_or(BuildError::NoInitialState)?;

        let tree = StateTree::from_linked(nodes, initial);
        tracing::trace!(
            states = tree.len(),
            initial = tree.id(initial).name(),
            "State tree built"
        );
        Ok(Hfsm::new(tree, self.config, warnings))
    }
}

impl<S: StateId, E: EventId> Default for HfsmBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject parent chains that never reach a root.
fn detect_cycles<S: StateId, E: EventId>(nodes: &[StateNode<S, E>]) -> Result<(), BuildError> {
    for node in nodes {
        let mut steps = 0;
        let mut current = node.parent;
        while let Some(p) = current {
            steps += 1;
            if steps > nodes.len() {
                return Err(BuildError::ParentCycle {
                    state: node.id.name().to_string(),
                });
            }
            current = nodes[p.0].parent;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    enum Input {
        Go,
    }

    #[test]
    fn builder_requires_a_root_state() {
        let result = HfsmBuilder::<&'static str, Input>::new().build();
        assert!(matches!(result, Err(BuildError::NoInitialState)));
    }

    #[test]
    fn duplicate_state_is_rejected_and_builder_stays_usable() {
        let mut builder = HfsmBuilder::<&'static str, Input>::new();
        builder.state("Root").unwrap();

        let err = builder.state("Root").err();
        assert_eq!(
            err,
            Some(BuildError::DuplicateState {
                name: "Root".to_string()
            })
        );

        builder.child("Idle", "Root").unwrap();
        let machine = builder.build().unwrap();
        assert_eq!(machine.tree().len(), 2);
    }

    #[test]
    fn first_root_registered_is_initial() {
        let mut builder = HfsmBuilder::<&'static str, Input>::new();
        builder
            .state("First")
            .unwrap()
            .state("Second")
            .unwrap()
            .child("Inner", "Second")
            .unwrap();

        let machine = builder.build().unwrap();
        let tree = machine.tree();
        assert_eq!(tree.id(tree.initial()), &"First");
    }

    #[test]
    fn children_keep_registration_order() {
        let mut builder = HfsmBuilder::<&'static str, Input>::new();
        builder
            .state("Root")
            .unwrap()
            .child("B", "Root")
            .unwrap()
            .child("A", "Root")
            .unwrap()
            .child("C", "Root")
            .unwrap();

        let machine = builder.build().unwrap();
        assert_eq!(machine.tree().children_of(&"Root"), vec![&"B", &"A", &"C"]);
    }

    #[test]
    fn child_may_be_registered_before_parent() {
        let mut builder = HfsmBuilder::<&'static str, Input>::new();
        builder
            .child("Leaf", "Branch")
            .unwrap()
            .state("Branch")
            .unwrap();

        let machine = builder.build().unwrap();
        assert_eq!(machine.tree().parent_of(&"Leaf"), Some(&"Branch"));
        assert_eq!(machine.tree().id(machine.tree().initial()), &"Branch");
    }

    #[test]
    fn unknown_parent_fails_build() {
        let mut builder = HfsmBuilder::<&'static str, Input>::new();
        builder.state("Root").unwrap().child("Lost", "Nowhere").unwrap();

        let result = builder.build();
        assert_eq!(
            result.err(),
            Some(BuildError::UnknownParent {
                state: "Lost".to_string(),
                parent: "Nowhere".to_string(),
            })
        );
    }

    #[test]
    fn parent_cycle_fails_build() {
        let mut builder = HfsmBuilder::<&'static str, Input>::new();
        builder
            .state("Root")
            .unwrap()
            .child("A", "B")
            .unwrap()
            .child("B", "A")
            .unwrap();

        assert!(matches!(
            builder.build(),
            Err(BuildError::ParentCycle { .. })
        ));
    }

    #[test]
    fn unresolved_transition_is_dropped_with_warning() {
        let mut builder = HfsmBuilder::<&'static str, Input>::new();
        builder
            .state("Root")
            .unwrap()
            .child("Idle", "Root")
            .unwrap()
            .transition_on("Idle", "Ghost", Input::Go)
            .transition_on("Phantom", "Idle", Input::Go)
            .transition_on("Idle", "Root", Input::Go);

        let machine = builder.build().unwrap();
        assert_eq!(
            machine.warnings(),
            &[
                BuildWarning::UnresolvedTransitionEndpoint {
                    description: "Idle -> Ghost on Go".to_string(),
                    endpoint: Endpoint::To,
                    state: "Ghost".to_string(),
                },
                BuildWarning::UnresolvedTransitionEndpoint {
                    description: "Phantom -> Idle on Go".to_string(),
                    endpoint: Endpoint::From,
                    state: "Phantom".to_string(),
                },
            ]
        );
        let idle = machine.tree().get(&"Idle").unwrap();
        assert_eq!(idle.transitions().len(), 1);
        assert_eq!(idle.transitions()[0].description(), "Idle -> Root on Go");
    }
}
