//! Builder API for assembling a state hierarchy.
//!
//! States and transitions are registered as descriptors in any order, then
//! [`HfsmBuilder::build`] links parents, resolves transition endpoints and
//! freezes the result into an engine.

pub mod error;
pub mod machine;
pub mod macros;
pub mod state;
pub mod transition;

pub use error::{BuildError, BuildWarning, Endpoint};
pub use machine::HfsmBuilder;
pub use state::StateBuilder;
pub use transition::TransitionBuilder;
