//! Resolution observers.
//!
//! Hooks for watching what a container resolves, how long it takes and
//! what fails. Observers are called synchronously on the resolving thread,
//! once per contract at every depth of the graph.

use std::sync::Arc;
use std::time::Duration;

use crate::error::IocError;
use crate::key::Key;

/// Observer trait for resolution events.
///
/// # Examples
///
/// ```
/// use ioclite::{Container, ContainerObserver, IocError, Key};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Recorder {
///     seen: Mutex<Vec<&'static str>>,
/// }
///
/// impl ContainerObserver for Recorder {
///     fn resolving(&self, key: &Key) {
///         self.seen.lock().unwrap().push(key.name());
///     }
///     fn resolved(&self, _key: &Key, _duration: Duration) {}
///     fn failed(&self, _key: &Key, _error: &IocError) {}
/// }
///
/// struct Clock;
/// ioclite::injectable!(Clock);
///
/// let recorder = Arc::new(Recorder::default());
/// let mut container = Container::new();
/// container.add_observer(recorder.clone());
/// container.register_transient::<Clock, Clock>();
/// container.resolve::<Clock>().unwrap();
///
/// assert_eq!(recorder.seen.lock().unwrap().len(), 1);
/// ```
pub trait ContainerObserver: Send + Sync {
    /// Called before a contract's descriptor is consulted.
    fn resolving(&self, key: &Key);

    /// Called after a contract resolved, with the time spent including
    /// its dependencies.
    fn resolved(&self, key: &Key, duration: Duration);

    /// Called when resolving a contract failed. Fires at every level the
    /// error passes through on its way up.
    fn failed(&self, key: &Key, error: &IocError);
}

/// Observer that forwards events to `tracing`.
///
/// Successful resolutions are logged at `TRACE`, failures at `WARN`.
#[derive(Debug, Clone, Default)]
pub struct LoggingObserver {
    prefix: Option<String>,
}

impl LoggingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags every event with `prefix`, e.g. the name of the container.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or("ioclite")
    }
}

impl ContainerObserver for LoggingObserver {
    fn resolving(&self, key: &Key) {
        tracing::trace!(container = self.prefix(), contract = key.name(), "resolving");
    }

    fn resolved(&self, key: &Key, duration: Duration) {
        tracing::trace!(container = self.prefix(), contract = key.name(), ?duration, "resolved");
    }

    fn failed(&self, key: &Key, error: &IocError) {
        tracing::warn!(container = self.prefix(), contract = key.name(), %error, "resolution failed");
    }
}

/// Observers registered on one container.
#[derive(Clone, Default)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn ContainerObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn ContainerObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    pub(crate) fn resolving(&self, key: &Key) {
        for observer in &self.observers {
            observer.resolving(key);
        }
    }

    pub(crate) fn resolved(&self, key: &Key, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(key, duration);
        }
    }

    pub(crate) fn failed(&self, key: &Key, error: &IocError) {
        for observer in &self.observers {
            observer.failed(key, error);
        }
    }
}
