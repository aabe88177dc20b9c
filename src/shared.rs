//! External synchronization for a logger shared between threads.
//!
//! A [`Logger`] has no interior locking. When one really must be shared, wrap
//! it here; every call then takes the lock for its duration. Loggers that stay
//! on one thread should not pay for this.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::error::Result;
use crate::logger::Logger;
use crate::snapshot::LoggerSnapshot;

/// A [`Logger`] behind an `Arc<Mutex<_>>`; clones share the same logger.
#[derive(Debug, Clone)]
pub struct SharedLogger {
    inner: Arc<Mutex<Logger>>,
}

impl SharedLogger {
    /// Take ownership of `logger`.
    pub fn new(logger: Logger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(logger)),
        }
    }

    /// Lock for a batch of calls.
    pub fn lock(&self) -> MutexGuard<'_, Logger> {
        self.inner.lock()
    }

    /// Locked [`Logger::event_begin`].
    pub fn event_begin(&self, name: &str) -> Result<()> {
        self.inner.lock().event_begin(name)
    }

    /// Locked [`Logger::event_end`].
    pub fn event_end(&self, name: &str) -> Result<()> {
        self.inner.lock().event_end(name)
    }

    /// Locked [`Logger::stage_push`].
    pub fn stage_push(&self, name: &str) -> Result<()> {
        self.inner.lock().stage_push(name)
    }

    /// Locked [`Logger::stage_pop`].
    pub fn stage_pop(&self) -> Result<usize> {
        self.inner.lock().stage_pop()
    }

    /// Locked [`Logger::snapshot`].
    pub fn snapshot(&self) -> Result<LoggerSnapshot> {
        self.inner.lock().snapshot()
    }

    /// Run `f` on the logger with the lock held.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Logger) -> R,
    {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }
}

impl From<Logger> for SharedLogger {
    fn from(logger: Logger) -> Self {
        Self::new(logger)
    }
}
