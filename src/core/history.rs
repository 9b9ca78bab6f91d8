//! Leaf-change history tracking.
//!
//! Every reconciliation that moves the active leaf is recorded as a
//! [`LeafChange`]. The history is bounded: once `limit` records are held the
//! oldest is evicted.

use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single change of the active leaf.
///
/// `from` is `None` when the machine was started, `to` is `None` when it was
/// stopped.
///
/// # Example
///
/// ```rust
/// use hfsm::core::LeafChange;
/// use chrono::Utc;
///
/// let change = LeafChange {
///     from: Some("Idle"),
///     to: Some("Walk"),
///     trigger: "Idle -> Walk on StartWalking".to_string(),
///     tick: 3,
///     timestamp: Utc::now(),
/// };
/// assert!(!change.is_start());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeafChange<S> {
    /// The leaf that was active before the change
    pub from: Option<S>,
    /// The leaf active after the change
    pub to: Option<S>,
    /// Description of what caused the change
    pub trigger: String,
    /// Engine tick on which the change happened
    pub tick: u64,
    /// When the change occurred
    pub timestamp: DateTime<Utc>,
}

impl<S> LeafChange<S> {
    pub fn is_start(&self) -> bool {
        self.from.is_none() && self.to.is_some()
    }

    pub fn is_stop(&self) -> bool {
        self.to.is_none()
    }
}

/// Bounded, ordered history of leaf changes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionHistory<S> {
    changes: VecDeque<LeafChange<S>>,
    limit: usize,
}

impl<S: StateId> TransitionHistory<S> {
    /// Create an empty history retaining at most `limit` records.
    ///
    /// A limit of zero records nothing.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            changes: VecDeque::with_capacity(limit.min(64)),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Append a change, evicting the oldest once the limit is reached.
    pub fn record(&mut self, change: LeafChange<S>) {
        if self.limit == 0 {
            return;
        }
        if self.changes.len() == self.limit {
            self.changes.pop_front();
        }
        self.changes.push_back(change);
    }

    pub fn changes(&self) -> impl Iterator<Item = &LeafChange<S>> + '_ {
        self.changes.iter()
    }

    pub fn last(&self) -> Option<&LeafChange<S>> {
        self.changes.back()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Leaves visited, oldest first.
    ///
    /// Starts with the `from` leaf of the oldest retained record (when there
    /// was one), followed by the `to` leaf of each record.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(from) = self.changes.front().and_then(|c| c.from.as_ref()) {
            path.push(from);
        }
        path.extend(self.changes.iter().filter_map(|c| c.to.as_ref()));
        path
    }

    /// Time spanned between the oldest and newest retained record.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.changes.front()?, self.changes.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(
        from: Option<&'static str>,
        to: Option<&'static str>,
        tick: u64,
    ) -> LeafChange<&'static str> {
        LeafChange {
            from,
            to,
            trigger: "test".to_string(),
            tick,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: TransitionHistory<&'static str> = TransitionHistory::with_limit(8);
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn get_path_returns_leaf_sequence() {
        let mut history = TransitionHistory::with_limit(8);
        history.record(change(None, Some("Idle"), 0));
        history.record(change(Some("Idle"), Some("Walk"), 1));
        history.record(change(Some("Walk"), Some("Run"), 2));

        assert_eq!(history.get_path(), vec![&"Idle", &"Walk", &"Run"]);
        assert!(history.changes().next().is_some_and(LeafChange::is_start));
    }

    #[test]
    fn oldest_record_is_evicted_at_limit() {
        let mut history = TransitionHistory::with_limit(2);
        history.record(change(None, Some("Idle"), 0));
        history.record(change(Some("Idle"), Some("Walk"), 1));
        history.record(change(Some("Walk"), Some("Run"), 2));

        assert_eq!(history.len(), 2);
        assert_eq!(history.get_path(), vec![&"Idle", &"Walk", &"Run"]);
        assert_eq!(history.last().map(|c| c.tick), Some(2));
    }

    #[test]
    fn zero_limit_records_nothing() {
        let mut history = TransitionHistory::with_limit(0);
        history.record(change(None, Some("Idle"), 0));
        assert!(history.is_empty());
    }

    #[test]
    fn stop_record_ends_path() {
        let mut history = TransitionHistory::with_limit(4);
        history.record(change(Some("Walk"), None, 5));

        assert!(history.last().is_some_and(LeafChange::is_stop));
        assert_eq!(history.get_path(), vec![&"Walk"]);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = TransitionHistory::with_limit(4);
        history.record(change(None, Some("Idle"), 0));
        std::thread::sleep(Duration::from_millis(10));
        history.record(change(Some("Idle"), Some("Walk"), 1));

        let duration = history.duration();
        assert!(duration.is_some_and(|d| d >= Duration::from_millis(10)));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = TransitionHistory::with_limit(4);
        history.record(LeafChange {
            from: Some("Idle".to_string()),
            to: Some("Walk".to_string()),
            trigger: "Idle -> Walk".to_string(),
            tick: 1,
            timestamp: Utc::now(),
        });

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: TransitionHistory<String> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.len(), 1);
        assert_eq!(deserialized.limit(), 4);
        assert_eq!(deserialized.last(), history.last());
    }
}
