//! Simulation worker thread.
//!
//! A worker owns one environment and one policy, runs episodes in a
//! loop, and reports scored episodes to the central decision loop.
//! Promotions arrive through the worker's [`crate::sync::TaskSlot`]
//! and are applied only at episode boundaries; an in-flight episode
//! always finishes under the task it started with.

use crossbeam_channel::{Receiver, Sender};

use crate::curriculum::CurriculumError;
use crate::environment::Environment;
use crate::messages::{CoordinatorMsg, FinishReason, WorkerMsg, WorkerStats};
use crate::policy::Policy;
use crate::sync::SharedTaskSlot;
use crate::trace::{EpisodeTrace, Transition};

use super::hooks::{EpisodeContext, HookSet};

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Worker ID (for logging and seed differentiation)
    pub worker_id: usize,
    /// Stop after this many episodes; `None` runs until stopped.
    pub max_episodes: Option<usize>,
    /// Hard per-episode step cap, applied on top of the environment's
    /// own truncation condition.
    pub max_steps_per_episode: usize,
    /// Base seed; each episode gets a distinct derived seed.
    pub seed: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            worker_id: 0,
            max_episodes: None,
            max_steps_per_episode: 10_000,
            seed: 0,
        }
    }
}

impl WorkerConfig {
    /// Create config for a specific worker ID.
    pub fn for_worker(worker_id: usize) -> Self {
        Self {
            worker_id,
            // Disjoint seed streams per worker.
            seed: (worker_id as u64) << 32,
            ..Default::default()
        }
    }

    /// Set the episode limit.
    pub fn with_max_episodes(mut self, max_episodes: usize) -> Self {
        self.max_episodes = Some(max_episodes);
        self
    }

    /// Set the per-episode step cap.
    pub fn with_max_steps_per_episode(mut self, max_steps: usize) -> Self {
        self.max_steps_per_episode = max_steps;
        self
    }

    /// Set the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Handle for controlling a spawned worker thread.
pub struct WorkerHandle {
    /// Thread handle
    pub thread: std::thread::JoinHandle<()>,
    /// Channel to send commands to the worker
    pub cmd_tx: Sender<WorkerMsg>,
}

impl WorkerHandle {
    /// Send a stop command to the worker.
    pub fn stop(&self) {
        let _ = self.cmd_tx.try_send(WorkerMsg::Stop);
    }

    /// Request a stats report over the coordinator channel.
    pub fn request_stats(&self) {
        let _ = self.cmd_tx.try_send(WorkerMsg::RequestStats);
    }

    /// Wait for the worker thread to finish.
    pub fn join(self) -> std::thread::Result<()> {
        self.thread.join()
    }
}

/// Episode-collecting worker.
///
/// Workers run in their own thread and per episode:
/// 1. Drain the task slot and apply any pending promotion
/// 2. Run the start hooks (curriculum sync, scenario sampling, config)
/// 3. Reset the environment and step it with the policy until done
/// 4. Run the end hooks (scoring) and report to the central loop
pub struct Worker {
    config: WorkerConfig,
}

impl Worker {
    /// Create a new worker with the given configuration.
    pub fn new(config: WorkerConfig) -> Self {
        Self { config }
    }

    /// Spawn the worker thread.
    ///
    /// The environment and policy move into the thread; the returned
    /// handle carries the command channel. Episode reports, stats, and
    /// the final finish notification travel over `coord_tx`.
    pub fn spawn<E, P>(
        self,
        mut env: E,
        mut policy: P,
        mut hooks: HookSet,
        task_slot: SharedTaskSlot,
        coord_tx: Sender<CoordinatorMsg>,
    ) -> WorkerHandle
    where
        E: Environment + 'static,
        P: Policy + 'static,
    {
        let config = self.config;
        let (cmd_tx, cmd_rx) = crossbeam_channel::bounded::<WorkerMsg>(100);

        let thread = std::thread::Builder::new()
            .name(format!("curriculum-worker-{}", config.worker_id))
            .spawn(move || {
                let reason = Self::run_loop(
                    &config,
                    &mut env,
                    &mut policy,
                    &mut hooks,
                    &task_slot,
                    &coord_tx,
                    &cmd_rx,
                );
                let _ = coord_tx.send(CoordinatorMsg::WorkerFinished {
                    worker_id: config.worker_id,
                    reason,
                });
            })
            .expect("Failed to spawn worker thread");

        WorkerHandle { thread, cmd_tx }
    }

    fn run_loop<E, P>(
        config: &WorkerConfig,
        env: &mut E,
        policy: &mut P,
        hooks: &mut HookSet,
        task_slot: &SharedTaskSlot,
        coord_tx: &Sender<CoordinatorMsg>,
        cmd_rx: &Receiver<WorkerMsg>,
    ) -> FinishReason
    where
        E: Environment,
        P: Policy,
    {
        let mut stats = WorkerStats::new(config.worker_id);
        let mut episode_seed = config.seed;

        loop {
            // Check for commands between episodes
            while let Ok(msg) = cmd_rx.try_recv() {
                match msg {
                    WorkerMsg::Stop => return FinishReason::Stopped,
                    WorkerMsg::RequestStats => {
                        let _ = coord_tx.try_send(CoordinatorMsg::worker_stats(stats.clone()));
                    }
                }
            }

            // Apply a pending promotion; only ever between episodes, so
            // an in-flight episode finishes under its original task.
            if let Some(task) = task_slot.take() {
                env.set_task(task);
            }

            let mut ctx = EpisodeContext::new(env.current_task());
            match hooks.on_episode_start(env, &mut ctx) {
                Ok(()) => {}
                // Past the last stage there is nothing left to run.
                Err(CurriculumError::OutOfRange { .. }) => return FinishReason::Completed,
                Err(e) => return FinishReason::Failed(e.to_string()),
            }

            let mut obs = env.reset(episode_seed);
            episode_seed = episode_seed.wrapping_add(1);

            let scenario = ctx.scenario.unwrap_or_default();
            let mut trace = EpisodeTrace::new(scenario, ctx.task);

            loop {
                let action = policy.act(&obs);
                let outcome = env.step(&action);
                let truncated =
                    outcome.truncated || trace.len() + 1 >= config.max_steps_per_episode;

                trace.push(Transition {
                    observation: obs,
                    action,
                    reward: outcome.reward,
                    terminal: outcome.terminated,
                    truncated,
                });
                obs = outcome.observation;

                if outcome.terminated || truncated {
                    break;
                }
            }

            if let Err(e) = hooks.on_episode_end(env, &trace) {
                return FinishReason::Failed(e.to_string());
            }

            stats.record_episode(trace.total_reward());
            stats.add_steps(trace.len());
            stats.task = trace.task;

            let _ = coord_tx.send(CoordinatorMsg::EpisodeReport {
                worker_id: config.worker_id,
                task: trace.task,
                scenario: trace.scenario.clone(),
                reward: trace.total_reward(),
                steps: trace.len(),
            });

            if let Some(max) = config.max_episodes {
                if stats.episodes >= max {
                    return FinishReason::Stopped;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_config_default() {
        let config = WorkerConfig::default();
        assert_eq!(config.worker_id, 0);
        assert_eq!(config.max_episodes, None);
        assert_eq!(config.max_steps_per_episode, 10_000);
    }

    #[test]
    fn test_worker_config_builder() {
        let config = WorkerConfig::for_worker(3)
            .with_max_episodes(50)
            .with_max_steps_per_episode(200)
            .with_seed(7);

        assert_eq!(config.worker_id, 3);
        assert_eq!(config.max_episodes, Some(50));
        assert_eq!(config.max_steps_per_episode, 200);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_worker_seeds_disjoint() {
        let a = WorkerConfig::for_worker(1);
        let b = WorkerConfig::for_worker(2);
        assert_ne!(a.seed, b.seed);
    }
}
