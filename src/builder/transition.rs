//! Builder for transition descriptors.

use crate::core::{EventId, Guard, StateId};

/// Describes a transition by the ids of its endpoints.
///
/// Endpoints are resolved when the hierarchy is built; a descriptor naming an
/// unknown state is dropped with a warning.
pub struct TransitionBuilder<S: StateId, E: EventId> {
    pub(crate) from: S,
    pub(crate) to: S,
    pub(crate) event: Option<E>,
    pub(crate) guard: Option<Guard>,
}

impl<S: StateId, E: EventId> TransitionBuilder<S, E> {
    pub fn new(from: S, to: S) -> Self {
        Self {
            from,
            to,
            event: None,
            guard: None,
        }
    }

    /// Only fire when `event` is the event presented on the tick.
    pub fn on_event(mut self, event: E) -> Self {
        self.event = Some(event);
        self
    }

    pub fn guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Label used in logs, history and trace callbacks.
    pub fn description(&self) -> String {
        let mut label = format!("{} -> {}", self.from.name(), self.to.name());
        if let Some(event) = &self.event {
            label.push_str(&format!(" on {event:?}"));
        }
        if self.guard.is_some() {
            label.push_str(" [guarded]");
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    enum Input {
        StartWalking,
    }

    #[test]
    fn description_names_endpoints() {
        let t: TransitionBuilder<&'static str, Input> = TransitionBuilder::new("Idle", "Walk");
        assert_eq!(t.description(), "Idle -> Walk");
    }

    #[test]
    fn description_includes_event_and_guard() {
        let t = TransitionBuilder::new("Idle", "Walk")
            .on_event(Input::StartWalking)
            .when(|| true);
        assert_eq!(t.description(), "Idle -> Walk on StartWalking [guarded]");
    }
}
