//! Message-passing infrastructure for curriculum training.
//!
//! Control messages travel over crossbeam channels; the task index
//! itself travels over [`crate::sync::TaskSlot`] so stale promotions
//! can never queue behind control traffic.
//!
//! # Architecture
//!
//! ```text
//!                   +-------------------+
//!                   |  Decision loop    |
//!                   +-------------------+
//!                     |       ^
//!        WorkerMsg /  |       |  CoordinatorMsg
//!        TaskSlot     v       |
//!                   +-------------------+
//!                   |  Worker threads   |
//!                   +-------------------+
//! ```

mod coordinator_msg;
mod worker_msg;

pub use coordinator_msg::{CoordinatorMsg, FinishReason};
pub use worker_msg::{WorkerMsg, WorkerStats};
