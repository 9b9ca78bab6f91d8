//! Guard predicates and lifecycle hooks.
//!
//! Guards are zero-argument boolean functions that gate a transition. Hooks
//! are zero-argument actions run when a state is entered, updated or exited.
//! Both are stored as boxed closures; an absent closure is normalized to a
//! trivial default when the tree is built, so the engine never branches on
//! "is there a callback".

use std::fmt;

/// Predicate that determines if a transition can fire.
///
/// Guards are evaluated fresh on every match attempt and must be cheap and
/// side-effect-free. A panicking guard is a caller bug: the panic propagates
/// out of [`Hfsm::update`](crate::Hfsm::update).
///
/// # Example
///
/// ```rust
/// use hfsm::core::Guard;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let stamina = Rc::new(Cell::new(10));
/// let s = Rc::clone(&stamina);
/// let can_run = Guard::new(move || s.get() > 5);
///
/// assert!(can_run.check());
/// stamina.set(2);
/// assert!(!can_run.check());
/// ```
pub struct Guard {
    predicate: Box<dyn Fn() -> bool>,
}

impl Guard {
    /// Create a guard from a predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// A guard that always passes.
    pub fn always() -> Self {
        Guard::new(|| true)
    }

    /// Evaluate the predicate.
    pub fn check(&self) -> bool {
        (self.predicate)()
    }
}

impl Default for Guard {
    fn default() -> Self {
        Self::always()
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

/// Side-effecting action attached to a state's enter, update or exit.
pub struct Hook {
    action: Box<dyn FnMut()>,
}

impl Hook {
    pub fn new<F>(action: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Hook {
            action: Box::new(action),
        }
    }

    /// A hook that does nothing.
    pub fn noop() -> Self {
        Hook::new(|| {})
    }

    pub fn run(&mut self) {
        (self.action)()
    }
}

impl Default for Hook {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Hook(..)")
    }
}

/// The three lifecycle hooks of a state.
#[derive(Debug, Default)]
pub struct Hooks {
    pub on_enter: Hook,
    pub on_update: Hook,
    pub on_exit: Hook,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn default_guard_always_passes() {
        let guard = Guard::default();
        assert!(guard.check());
        assert!(guard.check());
    }

    #[test]
    fn guard_reads_captured_state_fresh_each_time() {
        let open = Rc::new(Cell::new(false));
        let o = Rc::clone(&open);
        let guard = Guard::new(move || o.get());

        assert!(!guard.check());
        open.set(true);
        assert!(guard.check());
    }

    #[test]
    fn hook_runs_its_action() {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let mut hook = Hook::new(move || c.set(c.get() + 1));

        hook.run();
        hook.run();

        assert_eq!(count.get(), 2);
    }

    #[test]
    fn default_hooks_are_noops() {
        let mut hooks = Hooks::default();
        hooks.on_enter.run();
        hooks.on_update.run();
        hooks.on_exit.run();
    }
}
