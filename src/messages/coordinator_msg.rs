//! Messages sent to the central decision loop.

use super::WorkerStats;

/// Messages sent to the central loop from workers.
///
/// The central loop aggregates these alongside the shared metrics
/// store and decides when to promote.
#[derive(Debug, Clone)]
pub enum CoordinatorMsg {
    /// A worker finished one scored episode.
    EpisodeReport {
        worker_id: usize,
        /// Task the episode ran under.
        task: usize,
        /// Scenario that configured the episode.
        scenario: String,
        /// Total (summed) episode reward.
        reward: f32,
        /// Steps taken this episode.
        steps: usize,
    },

    /// Worker reports statistics.
    WorkerStats(WorkerStats),

    /// Worker thread finished (stopped, completed, or failed).
    WorkerFinished {
        worker_id: usize,
        reason: FinishReason,
    },
}

/// Reason why a worker thread finished.
#[derive(Debug, Clone)]
pub enum FinishReason {
    /// Normal shutdown after a Stop message.
    Stopped,

    /// The curriculum ran out of stages.
    Completed,

    /// Unrecoverable error in the episode loop.
    Failed(String),
}

impl CoordinatorMsg {
    /// Create a worker stats message.
    pub fn worker_stats(stats: WorkerStats) -> Self {
        Self::WorkerStats(stats)
    }
}
