//! Cross-thread synchronization primitives.
//!
//! Promotion decisions flow central-to-worker through single-value
//! swap slots: the central loop publishes the new task index, each
//! worker drains its slot at the next episode boundary. Scores flow
//! the other way through the shared metrics aggregator, so neither
//! direction ever blocks on the other.
//!
//! - [`TaskSlot`]: single-slot swap cell carrying the task index
//! - [`TaskBroadcaster`]: per-worker fan-out of promotions

pub mod broadcaster;
pub mod task_slot;

pub use broadcaster::TaskBroadcaster;
pub use task_slot::{task_slot, SharedTaskSlot, TaskSlot};
