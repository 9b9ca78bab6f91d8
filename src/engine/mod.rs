//! Runtime side of the state machine.
//!
//! The engine owns a built [`StateTree`](crate::core::StateTree) and keeps a
//! single active root-to-leaf path up to date, one tick at a time.
//!
//! # Key Concepts
//!
//! - **Tick**: one call to [`Hfsm::update`], consuming at most one event
//! - **Reconciliation**: the exit/enter diff run whenever the target changes
//! - **First-leaf descent**: composite targets resolve to their first leaf

mod config;
mod machine;
mod reconcile;

pub use config::{HfsmConfig, DEFAULT_HISTORY_LIMIT};
pub use machine::{Hfsm, MachineStatus, ScopedHfsm, TraceSink, UpdateOutcome};
pub use reconcile::Reconciliation;
