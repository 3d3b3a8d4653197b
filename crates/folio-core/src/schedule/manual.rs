//! Virtual-time scheduler for deterministic tests and tick-driven frontends.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use super::{ScheduleToken, ScheduledFn, Scheduler};

struct Inner {
    /// Current virtual time, advanced only by [`ManualScheduler::advance`].
    now: Duration,
    next_id: u64,
    /// Monotonic queue keyed by (deadline, insertion sequence): entries with
    /// equal deadlines run in the order they were scheduled.
    queue: BTreeMap<(Duration, u64), ScheduledFn>,
}

/// A scheduler on virtual time.
///
/// Nothing runs until [`advance`](Self::advance) is called; due callbacks
/// then run synchronously on the caller's thread, ordered by deadline and
/// then by insertion.
pub struct ManualScheduler {
    inner: Mutex<Inner>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                now: Duration::ZERO,
                next_id: 0,
                queue: BTreeMap::new(),
            }),
        }
    }

    /// Moves virtual time forward by `step` and runs every callback whose
    /// deadline falls within the window, in queue order.
    ///
    /// Virtual time jumps to each callback's deadline before it runs, and
    /// callbacks run outside the internal lock, so a callback may schedule a
    /// follow-up; the follow-up also runs if it falls within the same window.
    pub fn advance(&self, step: Duration) {
        let target = self.lock().now + step;

        loop {
            let due = {
                let mut inner = self.lock();
                match inner.queue.first_key_value() {
                    Some((&(deadline, _), _)) if deadline <= target => {
                        inner.now = deadline;
                        inner.queue.pop_first().map(|(_, callback)| callback)
                    }
                    _ => None,
                }
            };
            match due {
                Some(callback) => callback(),
                None => break,
            }
        }

        self.lock().now = target;
    }

    /// Number of callbacks still waiting to fire.
    pub fn pending(&self) -> usize {
        self.lock().queue.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, callback: ScheduledFn) -> ScheduleToken {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        let deadline = inner.now + delay;
        inner.queue.insert((deadline, id), callback);
        ScheduleToken::new(id)
    }

    fn cancel(&self, token: ScheduleToken) {
        let mut inner = self.lock();
        inner.queue.retain(|&(_, id), _| id != token.value());
    }
}
