//! Fan-out of promotion decisions to every worker.

use super::task_slot::{task_slot, SharedTaskSlot};

/// Broadcasts the approved task index to all registered workers.
///
/// Each worker gets its own [`super::TaskSlot`], so a slow worker never
/// blocks the central loop and never steals another worker's update.
/// Owned by the central decision loop; registration happens before the
/// workers spawn.
#[derive(Default)]
pub struct TaskBroadcaster {
    slots: Vec<SharedTaskSlot>,
}

impl TaskBroadcaster {
    /// Create a broadcaster with no registered workers.
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Register one worker and return its receive slot.
    pub fn register(&mut self) -> SharedTaskSlot {
        let slot = task_slot();
        self.slots.push(slot.clone());
        slot
    }

    /// Publish `task` to every registered worker.
    pub fn broadcast(&self, task: usize) {
        for slot in &self.slots {
            slot.publish(task);
        }
    }

    /// Number of registered workers.
    pub fn n_workers(&self) -> usize {
        self.slots.len()
    }
}
