//! Simulation workers and their episode lifecycle hooks.
//!
//! - [`Worker`]: owns an environment and a policy, runs episodes
//! - [`EpisodeHook`] / [`HookSet`]: ordered episode lifecycle observers
//! - [`CurriculumHook`]: scenario sampling, env config, scoring
//! - [`EpisodeStatsHook`]: per-scenario reward/length EMAs

pub mod hooks;
pub mod worker;

pub use hooks::{CurriculumHook, EpisodeContext, EpisodeHook, EpisodeStatsHook, HookSet};
pub use worker::{Worker, WorkerConfig, WorkerHandle};

#[cfg(test)]
mod tests;
