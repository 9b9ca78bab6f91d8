//! hfsm: a hierarchical finite-state machine engine
//!
//! States nest into a tree. Each state may carry enter/update/exit hooks and
//! an ordered list of guarded, optionally event-scoped transitions. The
//! engine keeps exactly one active path from a root to a leaf and advances it
//! one tick at a time.
//!
//! # Core Concepts
//!
//! - **State tree**: an arena of nodes built once by [`HfsmBuilder`]
//! - **Transitions**: matched against the active path root to leaf; the first
//!   match wins, and registration order is priority order
//! - **Reconciliation**: shared ancestors stay active across a transition;
//!   only the diverging part of the path is exited (leaf first) and entered
//!   (root first)
//!
//! # Example
//!
//! ```rust
//! use hfsm::{BuildError, Hfsm, HfsmBuilder};
//! use hfsm::state_ids;
//!
//! state_ids! {
//!     enum Locomotion {
//!         Root,
//!         Movement,
//!         Idle,
//!         Walk,
//!     }
//! }
//!
//! #[derive(Clone, PartialEq, Eq, Hash, Debug)]
//! enum Input {
//!     StartWalking,
//! }
//!
//! # fn main() -> Result<(), BuildError> {
//! let mut builder = HfsmBuilder::new();
//! builder
//!     .state(Locomotion::Root)?
//!     .child(Locomotion::Movement, Locomotion::Root)?
//!     .child(Locomotion::Idle, Locomotion::Movement)?
//!     .child(Locomotion::Walk, Locomotion::Movement)?
//!     .transition_on(Locomotion::Idle, Locomotion::Walk, Input::StartWalking);
//!
//! let mut machine: Hfsm<Locomotion, Input> = builder.build()?;
//! machine.start();
//! assert_eq!(machine.dotted_path(), "Root.Movement.Idle");
//!
//! machine.send_event(Input::StartWalking);
//! machine.update();
//! assert_eq!(machine.dotted_path(), "Root.Movement.Walk");
//!
//! machine.stop();
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::builder::{BuildError, BuildWarning, HfsmBuilder, StateBuilder, TransitionBuilder};
pub use crate::core::{EventId, Guard, LeafChange, StateId, StateTree};
pub use crate::engine::{Hfsm, HfsmConfig, MachineStatus, ScopedHfsm, UpdateOutcome};
