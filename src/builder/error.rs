//! Build errors and warnings for the hierarchy builder.

use thiserror::Error;

/// Errors that can occur when registering states or building the tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("State '{name}' is already registered")]
    DuplicateState { name: String },

    #[error("No root-level state registered. Add at least one state without a parent")]
    NoInitialState,

    #[error("State '{state}' declares unknown parent '{parent}'")]
    UnknownParent { state: String, parent: String },

    #[error("Parent chain of state '{state}' loops back on itself")]
    ParentCycle { state: String },
}

/// Which end of a transition descriptor could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    From,
    To,
}

/// Non-fatal problems found while building. The affected item is dropped and
/// the build still succeeds.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildWarning {
    #[error("Transition '{description}' dropped: unknown {endpoint:?} state '{state}'")]
    UnresolvedTransitionEndpoint {
        description: String,
        endpoint: Endpoint,
        state: String,
    },
}
