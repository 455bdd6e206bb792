//! Messages for simulation worker threads.
//!
//! # Data Integrity
//!
//! All statistics computations filter non-finite values (NaN, Inf) to
//! prevent corruption of running averages. A single corrupted reward
//! from a misbehaving scoring function or environment must never
//! poison the aggregated promotion signal.

/// Messages sent to worker threads from the central loop.
///
/// Workers receive commands via crossbeam channel; task-index updates
/// take the dedicated slot path instead so they can never queue up.
#[derive(Debug, Clone)]
pub enum WorkerMsg {
    /// Stop the worker gracefully at the next episode boundary.
    Stop,

    /// Request statistics from the worker.
    RequestStats,
}

/// Statistics reported by a worker.
///
/// Uses numerically stable algorithms for running averages to prevent
/// overflow and precision loss over long training runs.
#[derive(Debug, Clone, Default)]
pub struct WorkerStats {
    /// Worker identifier.
    pub worker_id: usize,

    /// Total environment steps taken.
    pub steps: usize,

    /// Total episodes completed (including those with non-finite rewards).
    pub episodes: usize,

    /// Number of episodes with valid (finite) rewards used in average.
    pub valid_episodes: usize,

    /// Number of episodes with non-finite rewards that were filtered.
    pub filtered_episodes: usize,

    /// Average episode reward (lifetime, valid episodes only).
    pub avg_episode_reward: f32,

    /// Most recent episode reward (may be non-finite for diagnostics).
    pub recent_episode_reward: f32,

    /// Task index the worker is currently running.
    pub task: usize,
}

impl WorkerStats {
    /// Create new worker stats.
    pub fn new(worker_id: usize) -> Self {
        Self {
            worker_id,
            ..Default::default()
        }
    }

    /// Update stats after episode completion.
    ///
    /// Uses Welford's online algorithm for numerically stable mean
    /// calculation. Non-finite rewards are filtered out of the average
    /// but still tracked in `filtered_episodes` for diagnostics.
    pub fn record_episode(&mut self, reward: f32) {
        self.episodes += 1;
        self.recent_episode_reward = reward;

        if !reward.is_finite() {
            self.filtered_episodes += 1;
            return;
        }

        // Welford: avg_new = avg_old + (x - avg_old) / n
        self.valid_episodes += 1;
        let delta = reward - self.avg_episode_reward;
        self.avg_episode_reward += delta / self.valid_episodes as f32;
    }

    /// Update step count. Saturating, never overflows.
    pub fn add_steps(&mut self, n: usize) {
        self.steps = self.steps.saturating_add(n);
    }

    /// Check if any episodes had non-finite rewards.
    pub fn has_filtered_episodes(&self) -> bool {
        self.filtered_episodes > 0
    }

    /// Fraction of episodes filtered due to non-finite rewards.
    pub fn filtered_fraction(&self) -> f32 {
        if self.episodes == 0 {
            0.0
        } else {
            self.filtered_episodes as f32 / self.episodes as f32
        }
    }
}
