//! Core state tree types.
//!
//! This module contains the data model of the hierarchy:
//! - State and event identifiers via the `StateId` / `EventId` traits
//! - Guard predicates and lifecycle hooks
//! - Arena nodes, transitions and the immutable `StateTree`
//! - Bounded leaf-change history

mod guard;
mod history;
mod node;
mod state;
mod tree;

pub use guard::{Guard, Hook, Hooks};
pub use history::{LeafChange, TransitionHistory};
pub use node::{StateIndex, StateNode, Transition};
pub use state::{EventId, StateId};
pub use tree::StateTree;
