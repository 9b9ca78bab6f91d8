//! Hierarchical state machine driving loop.

use crate::builder::BuildWarning;
use crate::core::{EventId, LeafChange, StateId, StateIndex, StateTree, TransitionHistory};
use crate::engine::config::HfsmConfig;
use crate::engine::reconcile::Reconciliation;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::ops::{Deref, DerefMut};

const START_TRIGGER: &str = "start";
const STOP_TRIGGER: &str = "stop";

/// Callback invoked whenever the active leaf changes.
pub type TraceSink<S> = Box<dyn FnMut(&LeafChange<S>)>;

/// Lifecycle of an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineStatus {
    NotStarted,
    Running,
    Stopped,
}

/// What a call to [`Hfsm::update`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateOutcome<S> {
    /// The machine was not running; it was started and nothing else ran.
    Started,

    /// A transition matched and the active path was reconciled.
    /// `from` and `to` are the leaves before and after; they are equal when
    /// the destination resolved to the already active leaf.
    Transitioned {
        from: Option<S>,
        to: Option<S>,
        trigger: String,
    },

    /// No transition matched; every active state's update hook ran.
    Updated,
}

/// Hierarchical finite-state machine.
///
/// Holds the immutable state tree, the active root-to-leaf path, and a FIFO
/// of pending events. Single-threaded: hooks and guards run synchronously on
/// the caller's thread inside [`start`](Self::start), [`update`](Self::update)
/// and [`stop`](Self::stop).
///
/// Dropping a running machine does not run exit hooks. Call `stop` first, or
/// wrap the machine with [`scoped`](Self::scoped).
pub struct Hfsm<S: StateId, E: EventId> {
    tree: StateTree<S, E>,
    active: Vec<StateIndex>,
    pending: VecDeque<E>,
    status: MachineStatus,
    ticks: u64,
    history: TransitionHistory<S>,
    config: HfsmConfig,
    warnings: Vec<BuildWarning>,
    trace_sink: Option<TraceSink<S>>,
}

impl<S: StateId, E: EventId> Hfsm<S, E> {
    pub(crate) fn new(
        tree: StateTree<S, E>,
        config: HfsmConfig,
        warnings: Vec<BuildWarning>,
    ) -> Self {
        Self {
            tree,
            active: Vec::new(),
            pending: VecDeque::new(),
            status: MachineStatus::NotStarted,
            ticks: 0,
            history: TransitionHistory::with_limit(config.history_limit),
            config,
            warnings,
            trace_sink: None,
        }
    }

    /// Enter the initial state and descend to its first leaf.
    ///
    /// On a running machine this re-targets the initial state; only nodes
    /// whose membership in the active path changes get hooks.
    pub fn start(&mut self) {
        tracing::trace!(status = ?self.status, "Starting state machine");
        self.status = MachineStatus::Running;
        self.reconcile(Some(self.tree.initial()), START_TRIGGER);
    }

    /// Run one tick.
    ///
    /// A machine that is not running is started and nothing else happens on
    /// this call. Otherwise at most one pending event is consumed and the
    /// active path is walked root to leaf: the first state with a matching
    /// transition wins and ends the tick, every state above it has already
    /// run its update hook.
    pub fn update(&mut self) -> UpdateOutcome<S> {
        if self.status != MachineStatus::Running {
            self.start();
            return UpdateOutcome::Started;
        }

        self.ticks += 1;
        let event = self.pending.pop_front();

        for depth in 0..self.active.len() {
            let index = self.active[depth];
            let matched = self
                .tree
                .node(index)
                .check_transitions(event.as_ref())
                .map(|t| (t.destination(), t.description().to_string()));

            if let Some((destination, trigger)) = matched {
                let from = self.active_leaf().cloned();
                self.reconcile(Some(destination), &trigger);
                let to = self.active_leaf().cloned();
                return UpdateOutcome::Transitioned { from, to, trigger };
            }

            self.tree.node_mut(index).hooks.on_update.run();
        }

        if let Some(event) = &event {
            tracing::trace!(?event, "Event matched no transition");
        }
        UpdateOutcome::Updated
    }

    /// Queue an event for a later tick.
    pub fn send_event(&mut self, event: E) {
        tracing::trace!(?event, queued = self.pending.len() + 1, "Event queued");
        self.pending.push_back(event);
    }

    /// Exit every active state, leaf first, and clear the active path.
    pub fn stop(&mut self) {
        if self.status != MachineStatus::Running {
            return;
        }
        tracing::trace!("Stopping state machine");
        self.reconcile(None, STOP_TRIGGER);
        self.status = MachineStatus::Stopped;
    }

    /// Wrap the machine so that dropping it runs [`stop`](Self::stop).
    pub fn scoped(self) -> ScopedHfsm<S, E> {
        ScopedHfsm { machine: self }
    }

    fn reconcile(&mut self, target: Option<StateIndex>, trigger: &str) {
        let Reconciliation {
            future_path,
            exiting,
            entering,
        } = Reconciliation::plan(&self.tree, &self.active, target);

        let old_leaf = self.active.last().copied();
        for &index in &exiting {
            self.tree.node_mut(index).hooks.on_exit.run();
        }
        self.active = future_path;
        for &index in &entering {
            self.tree.node_mut(index).hooks.on_enter.run();
        }
        let new_leaf = self.active.last().copied();

        if old_leaf == new_leaf {
            tracing::trace!(trigger, "Transition resolved to the active leaf");
            return;
        }

        let change = LeafChange {
            from: old_leaf.map(|i| self.tree.id(i).clone()),
            to: new_leaf.map(|i| self.tree.id(i).clone()),
            trigger: trigger.to_string(),
            tick: self.ticks,
            timestamp: Utc::now(),
        };
        tracing::debug!(
            from = change.from.as_ref().map(StateId::name),
            to = change.to.as_ref().map(StateId::name),
            trigger,
            exited = exiting.len(),
            entered = entering.len(),
            "Active leaf changed"
        );
        if let Some(sink) = self.trace_sink.as_mut() {
            sink(&change);
        }
        self.history.record(change);
    }

    /// Install a callback invoked whenever the active leaf changes.
    pub fn set_trace_sink<F>(&mut self, sink: F)
    where
        F: FnMut(&LeafChange<S>) + 'static,
    {
        self.trace_sink = Some(Box::new(sink));
    }

    pub fn clear_trace_sink(&mut self) {
        self.trace_sink = None;
    }

    /// Active state ids, root to leaf. Empty before start and after stop.
    pub fn active_state_hierarchy(&self) -> Vec<&S> {
        self.active.iter().map(|&i| self.tree.id(i)).collect()
    }

    /// Active state names joined with `.`, e.g. `Root.Movement.Idle`.
    pub fn dotted_path(&self) -> String {
        self.active
            .iter()
            .map(|&i| self.tree.id(i).name())
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn active_leaf(&self) -> Option<&S> {
        self.active.last().map(|&i| self.tree.id(i))
    }

    /// Whether `id` is anywhere on the active path.
    pub fn is_in(&self, id: &S) -> bool {
        self.tree
            .index_of(id)
            .is_some_and(|index| self.active.contains(&index))
    }

    pub fn status(&self) -> MachineStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == MachineStatus::Running
    }

    /// Number of events waiting for a tick.
    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    /// Ticks that ran past the implicit start.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tree(&self) -> &StateTree<S, E> {
        &self.tree
    }

    pub fn history(&self) -> &TransitionHistory<S> {
        &self.history
    }

    pub fn config(&self) -> &HfsmConfig {
        &self.config
    }

    /// Problems found while building that did not prevent the build.
    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }

    #[cfg(test)]
    pub(crate) fn into_tree(self) -> StateTree<S, E> {
        self.tree
    }
}

impl<S: StateId, E: EventId> fmt::Debug for Hfsm<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hfsm")
            .field("active", &self.dotted_path())
            .field("status", &self.status)
            .field("pending", &self.pending)
            .field("ticks", &self.ticks)
            .field("states", &self.tree.len())
            .finish()
    }
}

/// Scope guard that stops the wrapped machine when dropped.
pub struct ScopedHfsm<S: StateId, E: EventId> {
    machine: Hfsm<S, E>,
}

impl<S: StateId, E: EventId> Deref for ScopedHfsm<S, E> {
    type Target = Hfsm<S, E>;

    fn deref(&self) -> &Self::Target {
        &self.machine
    }
}

impl<S: StateId, E: EventId> DerefMut for ScopedHfsm<S, E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.machine
    }
}

impl<S: StateId, E: EventId> Drop for ScopedHfsm<S, E> {
    fn drop(&mut self) {
        self.machine.stop();
    }
}
