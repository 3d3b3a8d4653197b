//! Tokio-backed scheduler used by interactive frontends.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::AbortHandle;

use super::{ScheduleToken, ScheduledFn, Scheduler};

/// Schedules callbacks as one-shot tokio tasks.
///
/// Each callback is spawned onto the current runtime behind a
/// `tokio::time::sleep`; cancellation aborts the task. Must be used from
/// within a tokio runtime.
pub struct TokioScheduler {
    next_id: AtomicU64,
    tasks: Arc<Mutex<HashMap<u64, AbortHandle>>>,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for TokioScheduler {
    fn default() -> Self {
        Self::new()
    }
}

fn lock(
    tasks: &Mutex<HashMap<u64, AbortHandle>>,
) -> std::sync::MutexGuard<'_, HashMap<u64, AbortHandle>> {
    tasks.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, callback: ScheduledFn) -> ScheduleToken {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let tasks = Arc::clone(&self.tasks);

        // The map entry is inserted while this guard is held, so the spawned
        // task cannot observe the map before its own handle is registered.
        let mut guard = lock(&self.tasks);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            lock(&tasks).remove(&id);
            callback();
        });
        guard.insert(id, handle.abort_handle());

        ScheduleToken::new(id)
    }

    fn cancel(&self, token: ScheduleToken) {
        if let Some(handle) = lock(&self.tasks).remove(&token.value()) {
            handle.abort();
        }
    }
}
