//! Builder for state registrations.

use crate::core::{Hook, Hooks, StateId};

/// Describes one state: its id, optional parent, and optional hooks.
///
/// Hooks left unset become no-ops when the tree is built.
pub struct StateBuilder<S: StateId> {
    pub(crate) id: S,
    pub(crate) parent: Option<S>,
    on_enter: Option<Hook>,
    on_update: Option<Hook>,
    on_exit: Option<Hook>,
}

impl<S: StateId> StateBuilder<S> {
    pub fn new(id: S) -> Self {
        Self {
            id,
            parent: None,
            on_enter: None,
            on_update: None,
            on_exit: None,
        }
    }

    /// Nest this state under `parent`.
    pub fn parent(mut self, parent: S) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn on_enter<F>(mut self, action: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_enter = Some(Hook::new(action));
        self
    }

    pub fn on_update<F>(mut self, action: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_update = Some(Hook::new(action));
        self
    }

    pub fn on_exit<F>(mut self, action: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_exit = Some(Hook::new(action));
        self
    }

    pub(crate) fn into_hooks(self) -> Hooks {
        Hooks {
            on_enter: self.on_enter.unwrap_or_default(),
            on_update: self.on_update.unwrap_or_default(),
            on_exit: self.on_exit.unwrap_or_default(),
        }
    }
}
