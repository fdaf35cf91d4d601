#![forbid(unsafe_code)]

//! Listener lifecycle management.
//!
//! The controller declares which platform listeners it needs; the registry
//! starts and stops them through a [`ListenerBinder`].
//!
//! # How it works
//!
//! 1. [`NavController::listeners`](crate::NavController::listeners) returns
//!    the set of listeners needed in the current state (`ScrollEnd` only
//!    while a programmatic scroll is guarded).
//! 2. After each handled event the host calls [`ListenerRegistry::reconcile`].
//! 3. Newly declared listeners are bound, undeclared ones are unbound,
//!    unchanged ones are left alone.
//! 4. On teardown [`ListenerRegistry::stop_all`] unbinds everything, so no
//!    listener outlives its controller.

use std::fmt;

/// A platform event source the controller listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerKind {
    Scroll,
    ScrollEnd,
    KeyDown,
    HistoryNavigation,
}

impl ListenerKind {
    /// DOM event type name for this listener.
    #[must_use]
    pub const fn dom_event(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::ScrollEnd => "scrollend",
            Self::KeyDown => "keydown",
            Self::HistoryNavigation => "popstate",
        }
    }
}

impl fmt::Display for ListenerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dom_event())
    }
}

/// A listener could not be registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindError {
    pub kind: ListenerKind,
    pub message: String,
}

impl BindError {
    pub fn new(kind: ListenerKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to bind {} listener: {}", self.kind, self.message)
    }
}

impl std::error::Error for BindError {}

/// Platform side of listener registration.
pub trait ListenerBinder {
    /// Register the platform listener for `kind`.
    fn bind(&mut self, kind: ListenerKind) -> Result<(), BindError>;

    /// Remove the platform listener for `kind`. Must tolerate unknown kinds.
    fn unbind(&mut self, kind: ListenerKind);
}

/// Tracks which listeners are currently bound.
#[derive(Debug, Default, Clone)]
pub struct ListenerRegistry {
    active: Vec<ListenerKind>,
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the bound set in line with `declared`.
    ///
    /// Bind failures are logged and returned; the failed kind stays
    /// unbound and is retried on the next reconcile.
    pub fn reconcile<B>(&mut self, declared: &[ListenerKind], binder: &mut B) -> Vec<BindError>
    where
        B: ListenerBinder + ?Sized,
    {
        let active_before = self.active.len();

        let mut remaining = Vec::with_capacity(self.active.len());
        for kind in self.active.drain(..) {
            if declared.contains(&kind) {
                remaining.push(kind);
            } else {
                tracing::debug!(listener = %kind, "stopping listener");
                binder.unbind(kind);
            }
        }
        self.active = remaining;

        let mut failures = Vec::new();
        for &kind in declared {
            if self.active.contains(&kind) {
                continue;
            }
            match binder.bind(kind) {
                Ok(()) => {
                    tracing::debug!(listener = %kind, "starting listener");
                    self.active.push(kind);
                }
                Err(err) => {
                    tracing::warn!(listener = %kind, error = %err, "listener bind failed");
                    failures.push(err);
                }
            }
        }

        tracing::trace!(
            active_before,
            active_after = self.active.len(),
            "listener reconcile complete"
        );
        failures
    }

    /// Unbind every active listener.
    pub fn stop_all<B>(&mut self, binder: &mut B)
    where
        B: ListenerBinder + ?Sized,
    {
        for kind in self.active.drain(..) {
            binder.unbind(kind);
        }
    }

    #[must_use]
    pub fn is_active(&self, kind: ListenerKind) -> bool {
        self.active.contains(&kind)
    }

    /// Currently bound listeners, in bind order.
    #[must_use]
    pub fn active(&self) -> &[ListenerKind] {
        &self.active
    }

    #[inline]
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeBinder {
        bound: Vec<ListenerKind>,
        log: Vec<String>,
        reject: Option<ListenerKind>,
    }

    impl ListenerBinder for FakeBinder {
        fn bind(&mut self, kind: ListenerKind) -> Result<(), BindError> {
            if self.reject == Some(kind) {
                return Err(BindError::new(kind, "unsupported"));
            }
            self.bound.push(kind);
            self.log.push(format!("+{kind}"));
            Ok(())
        }

        fn unbind(&mut self, kind: ListenerKind) {
            self.bound.retain(|k| *k != kind);
            self.log.push(format!("-{kind}"));
        }
    }

    const BASE: [ListenerKind; 3] = [
        ListenerKind::Scroll,
        ListenerKind::KeyDown,
        ListenerKind::HistoryNavigation,
    ];

    #[test]
    fn reconcile_starts_declared() {
        let mut registry = ListenerRegistry::new();
        let mut binder = FakeBinder::default();
        assert!(registry.reconcile(&BASE, &mut binder).is_empty());
        assert_eq!(binder.bound, BASE);
        assert_eq!(registry.active_count(), 3);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let mut registry = ListenerRegistry::new();
        let mut binder = FakeBinder::default();
        registry.reconcile(&BASE, &mut binder);
        registry.reconcile(&BASE, &mut binder);
        assert_eq!(binder.log.len(), 3);
    }

    #[test]
    fn reconcile_stops_undeclared() {
        let mut registry = ListenerRegistry::new();
        let mut binder = FakeBinder::default();
        let mut guarded = BASE.to_vec();
        guarded.push(ListenerKind::ScrollEnd);
        registry.reconcile(&guarded, &mut binder);
        assert!(registry.is_active(ListenerKind::ScrollEnd));

        registry.reconcile(&BASE, &mut binder);
        assert!(!registry.is_active(ListenerKind::ScrollEnd));
        assert_eq!(binder.log.last().map(String::as_str), Some("-scrollend"));
    }

    #[test]
    fn failed_bind_is_reported_and_retried() {
        let mut registry = ListenerRegistry::new();
        let mut binder = FakeBinder {
            reject: Some(ListenerKind::ScrollEnd),
            ..FakeBinder::default()
        };
        let failures = registry.reconcile(&[ListenerKind::ScrollEnd], &mut binder);
        assert_eq!(failures.len(), 1);
        assert_eq!(
            failures[0].to_string(),
            "failed to bind scrollend listener: unsupported"
        );
        assert!(!registry.is_active(ListenerKind::ScrollEnd));

        binder.reject = None;
        assert!(registry.reconcile(&[ListenerKind::ScrollEnd], &mut binder).is_empty());
        assert!(registry.is_active(ListenerKind::ScrollEnd));
    }

    #[test]
    fn stop_all_leaves_nothing_bound() {
        let mut registry = ListenerRegistry::new();
        let mut binder = FakeBinder::default();
        registry.reconcile(&BASE, &mut binder);
        registry.stop_all(&mut binder);
        assert!(binder.bound.is_empty());
        assert_eq!(registry.active_count(), 0);
    }
}
