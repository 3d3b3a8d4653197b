//! One-shot delayed-callback scheduling.
//!
//! The assistant widget simulates typing latency by deferring its reply
//! through a [`Scheduler`]. The capability is deliberately narrow: schedule a
//! single callback after a delay, optionally cancel it via the returned
//! token. Two implementations are provided:
//!
//! - [`TokioScheduler`]: production implementation backed by `tokio::spawn`
//!   and `tokio::time::sleep`.
//! - [`ManualScheduler`]: deterministic implementation driven by explicit
//!   [`ManualScheduler::advance`] calls, for tests and tick-driven frontends.

mod manual;
mod runtime;

pub use manual::ManualScheduler;
pub use runtime::TokioScheduler;

use std::time::Duration;

/// A deferred callback, boxed for dynamic dispatch across scheduler backends.
pub type ScheduledFn = Box<dyn FnOnce() + Send + 'static>;

/// Opaque handle identifying one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleToken(u64);

impl ScheduleToken {
    /// Creates a token from a scheduler-assigned id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the scheduler-assigned id.
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Schedules one-shot delayed callbacks.
///
/// `schedule` must not block: it registers the callback and returns
/// immediately. Callbacks scheduled for the same deadline run in the order
/// they were scheduled.
pub trait Scheduler: Send + Sync {
    /// Registers `callback` to run once after `delay`.
    fn schedule(&self, delay: Duration, callback: ScheduledFn) -> ScheduleToken;

    /// Cancels a previously scheduled callback. Cancelling a token that has
    /// already fired (or was already cancelled) is a no-op.
    fn cancel(&self, token: ScheduleToken);
}
