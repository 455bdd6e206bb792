//! Single-slot task-index transfer between the central decision loop
//! and one worker.
//!
//! Uses swap semantics: a new publication overwrites any pending value,
//! so a worker that stalls for several promotions wakes up to exactly
//! the latest task index, never a backlog of stale ones.
//!
//! ```text
//! Memory invariant: slot.pending <= 1 value at all times
//! ```

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Single-slot container carrying the approved task index to a worker.
///
/// The central loop publishes after each promotion; the worker drains
/// at its next episode boundary. Promotions are rare relative to
/// episodes, so the slot is almost always empty.
pub struct TaskSlot {
    pending: Mutex<Option<usize>>,
    /// Bumped on every publish; lets observers detect missed updates.
    version: AtomicU64,
    published_count: AtomicUsize,
    /// Publications overwritten before the worker drained them.
    dropped_count: AtomicUsize,
    taken_count: AtomicUsize,
}

impl TaskSlot {
    /// Create a new empty slot.
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(None),
            version: AtomicU64::new(0),
            published_count: AtomicUsize::new(0),
            dropped_count: AtomicUsize::new(0),
            taken_count: AtomicUsize::new(0),
        }
    }

    /// Publish a task index, overwriting any pending value.
    ///
    /// Returns true if a pending value was overwritten.
    pub fn publish(&self, task: usize) -> bool {
        let mut guard = self.pending.lock();
        let was_pending = guard.is_some();
        if was_pending {
            self.dropped_count.fetch_add(1, Ordering::Relaxed);
        }
        *guard = Some(task);
        self.version.fetch_add(1, Ordering::Release);
        self.published_count.fetch_add(1, Ordering::Relaxed);
        was_pending
    }

    /// Take the pending task index, leaving the slot empty.
    ///
    /// Called by the worker at episode boundaries. Returns `None` if no
    /// update is pending.
    pub fn take(&self) -> Option<usize> {
        let mut guard = self.pending.lock();
        let result = guard.take();
        if result.is_some() {
            self.taken_count.fetch_add(1, Ordering::Relaxed);
        }
        result
    }

    /// Check for a pending update without taking it.
    pub fn has_pending(&self) -> bool {
        self.pending.lock().is_some()
    }

    /// Read the pending value without removing it.
    pub fn peek(&self) -> Option<usize> {
        *self.pending.lock()
    }

    /// Publish sequence number.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Debug statistics: (published, dropped, taken)
    pub fn stats(&self) -> (usize, usize, usize) {
        (
            self.published_count.load(Ordering::Relaxed),
            self.dropped_count.load(Ordering::Relaxed),
            self.taken_count.load(Ordering::Relaxed),
        )
    }
}

impl Default for TaskSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe shared task slot.
pub type SharedTaskSlot = Arc<TaskSlot>;

/// Create a new shared task slot.
pub fn task_slot() -> SharedTaskSlot {
    Arc::new(TaskSlot::new())
}
