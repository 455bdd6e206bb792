//! # Curriculum RL: Staged Task Progression for Simulation Training
//!
//! Multi-threaded curriculum engine for reinforcement learning in a
//! physics-based vehicle-soccer simulation. Workers collect episodes
//! under scenario-specific environment configurations; a central
//! decision loop aggregates per-scenario scores and advances the whole
//! fleet through the curriculum one stage at a time.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Curriculum Training                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  Thread 1           Thread 2           Thread N                  │
//! │  ┌─────────┐        ┌─────────┐        ┌─────────┐              │
//! │  │Worker 0 │        │Worker 1 │        │Worker N │              │
//! │  │ env     │        │ env     │        │ env     │              │
//! │  │ policy  │        │ policy  │        │ policy  │              │
//! │  │ hooks   │        │ hooks   │        │ hooks   │              │
//! │  └───┬─────┘        └───┬─────┘        └───┬─────┘              │
//! │      │                  │                  │                     │
//! │      └──────────────────┼──────────────────┘                     │
//! │                         ▼                                        │
//! │            ┌────────────────────┐    ┌──────────────┐           │
//! │            │ MetricsAggregator  │    │  TaskSlot x N│           │
//! │            │ (shared scores)    │    │ (swap sync)  │           │
//! │            └─────────┬──────────┘    └──────▲───────┘           │
//! │                      ▼                      │                    │
//! │            ┌────────────────────┐           │                    │
//! │            │  PromotionDriver   │───────────┘                    │
//! │            │ (decision cycles)  │                                │
//! │            └────────────────────┘                                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Scores flow worker-to-driver through the shared aggregator;
//! promotions flow driver-to-worker through per-worker swap slots and
//! land only at episode boundaries. Episode traces carry the scenario
//! and task that configured them, so a promotion arriving mid-episode
//! can never mis-attribute a score.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use curriculum_rl::curriculum::{Curriculum, CurriculumManager, Scenario};
//! use curriculum_rl::driver::PromotionDriver;
//! use curriculum_rl::metrics::metrics_aggregator;
//! use curriculum_rl::workers::{CurriculumHook, HookSet, Worker, WorkerConfig};
//!
//! let curriculum = Arc::new(Curriculum::new(stages)?);
//! let aggregator = metrics_aggregator();
//! let manager = CurriculumManager::new(curriculum);
//! let mut driver = PromotionDriver::new(manager.clone(), aggregator.clone());
//!
//! let slot = driver.register_worker();
//! let hooks = HookSet::new().add(CurriculumHook::new(manager, aggregator));
//! let handle = Worker::new(WorkerConfig::for_worker(0))
//!     .spawn(env, policy, hooks, slot, coord_tx);
//!
//! loop {
//!     let result = driver.run_cycle();
//!     if result.complete { break; }
//! }
//! ```

pub mod curriculum;
pub mod driver;
pub mod environment;
pub mod messages;
pub mod metrics;
pub mod policy;
pub mod rewards;
pub mod sim;
pub mod sync;
pub mod termination;
pub mod trace;
pub mod workers;

pub use curriculum::{metric_key, Curriculum, CurriculumError, CurriculumManager, Scenario};
pub use driver::{CycleResult, PromotionDriver};
pub use environment::{EnvConfig, Environment, StepOutcome};
pub use messages::{CoordinatorMsg, FinishReason, WorkerMsg, WorkerStats};
pub use metrics::{metrics_aggregator, MetricsAggregator, SharedMetricsAggregator};
pub use policy::Policy;
pub use sync::{TaskBroadcaster, TaskSlot};
pub use trace::{Action, EpisodeTrace, TraceWindow, Transition};
pub use workers::{CurriculumHook, EpisodeHook, HookSet, Worker, WorkerConfig, WorkerHandle};
