//! Single-shot publication cells for background stage results
//!
//! A `StageCell` carries the output of one background unit of work from the
//! producing thread to any number of waiting readers. The result is written
//! exactly once; readers block until it is published and then read the same
//! immutable value (or the same stored fault) on every subsequent wait.

use parking_lot::{Condvar, Mutex};
use std::sync::OnceLock;
use std::time::Duration;

/// Fault captured from a failed stage, re-raised on every wait.
#[derive(Debug, Clone)]
pub(crate) struct StageFault {
    pub reason: String,
}

impl StageFault {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// One-shot result slot with blocking wait semantics.
///
/// The slot is written before the done flag is flipped under the mutex, so a
/// reader woken by the condvar can never observe a half-published value.
pub(crate) struct StageCell<T> {
    slot: OnceLock<Result<T, StageFault>>,
    done: Mutex<bool>,
    cond: Condvar,
}

impl<T> StageCell<T> {
    pub fn new() -> Self {
        Self {
            slot: OnceLock::new(),
            done: Mutex::new(false),
            cond: Condvar::new(),
        }
    }

    /// Publish the stage result. A second publish is ignored.
    pub fn publish(&self, result: Result<T, StageFault>) {
        if self.slot.set(result).is_err() {
            tracing::warn!("stage result published twice; second publish ignored");
            return;
        }
        let mut done = self.done.lock();
        *done = true;
        self.cond.notify_all();
    }

    /// Block the calling thread until the stage publishes, then read it.
    pub fn wait(&self) -> Result<&T, StageFault> {
        let mut done = self.done.lock();
        while !*done {
            self.cond.wait(&mut done);
        }
        drop(done);
        self.read()
    }

    /// Bounded wait; `None` when the timeout elapses before publication.
    pub fn wait_for(&self, timeout: Duration) -> Option<Result<&T, StageFault>> {
        let deadline = std::time::Instant::now() + timeout;
        let mut done = self.done.lock();
        while !*done {
            if self.cond.wait_until(&mut done, deadline).timed_out() {
                return None;
            }
        }
        drop(done);
        Some(self.read())
    }

    fn read(&self) -> Result<&T, StageFault> {
        match self.slot.get() {
            Some(Ok(value)) => Ok(value),
            Some(Err(fault)) => Err(fault.clone()),
            // Unreachable once the done flag is set; handled without panicking.
            None => Err(StageFault::new("stage finished without publishing")),
        }
    }
}
