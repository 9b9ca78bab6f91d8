//! Identifier traits for states and events.
//!
//! The engine never inspects what a state or event *is*; it only compares,
//! hashes, and names them. Any enum, string, or small value type satisfying
//! these bounds can be used as a token.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for tokens naming a state in the hierarchy.
///
/// State ids must be unique across the whole tree. The `name` is used for
/// dotted paths, transition descriptions and build errors.
///
/// # Required Traits
///
/// - `Clone`: ids are copied into the tree index and into history records
/// - `Eq` + `Hash`: ids are looked up while linking the tree
/// - `Debug`: ids appear in logs
///
/// # Example
///
/// ```rust
/// use hfsm::core::StateId;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Locomotion {
///     Idle,
///     Walk,
/// }
///
/// impl StateId for Locomotion {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Walk => "Walk",
///         }
///     }
/// }
///
/// assert_eq!(Locomotion::Walk.name(), "Walk");
/// ```
pub trait StateId: Clone + Eq + Hash + Debug {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

impl StateId for &'static str {
    fn name(&self) -> &str {
        self
    }
}

impl StateId for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

/// Trait for tokens naming an event.
///
/// Blanket-implemented for every type with the required bounds; events are
/// only ever compared for equality against a transition's filter.
pub trait EventId: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> EventId for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    enum TestState {
        Root,
        Leaf,
    }

    impl StateId for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Root => "Root",
                Self::Leaf => "Leaf",
            }
        }
    }

    fn assert_event<E: EventId>(_event: &E) {}

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Root.name(), "Root");
        assert_eq!(TestState::Leaf.name(), "Leaf");
    }

    #[test]
    fn string_ids_name_themselves() {
        assert_eq!("Walk".name(), "Walk");
        assert_eq!(String::from("Run").name(), "Run");
    }

    #[test]
    fn any_hashable_value_is_an_event() {
        assert_event(&42u32);
        assert_event(&"jump");
        assert_event(&TestState::Leaf);
    }
}
