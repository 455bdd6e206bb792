//! Environment boundary for the curriculum engine.
//!
//! The physics simulation and observation encoding live behind the
//! [`Environment`] trait; the curriculum only configures environments
//! (via [`EnvConfig`]) and reads their task counter. The environment
//! object persists across episodes within a worker, which makes it the
//! durable source of truth for "what task is this worker on" while
//! promotion broadcasts arrive asynchronously.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rewards::{RewardKind, RewardSpec};
use crate::sim::mutators::MutatorKind;
use crate::sim::state::GameState;
use crate::termination::TerminationKind;
use crate::trace::Action;

/// Complete per-scenario environment configuration: initial-state
/// distribution, reward shaping weights, and episode-ending rules.
///
/// The curriculum passes this bundle verbatim to `load_config`; it
/// never interprets the contents itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Initial-state mutator.
    pub mutator: MutatorKind,
    /// Weighted reward components.
    pub rewards: Vec<RewardSpec>,
    /// Terminal condition (episode goal resolved).
    pub termination: TerminationKind,
    /// Truncation condition (episode budget spent).
    pub truncation: TerminationKind,
}

impl EnvConfig {
    /// Create a config with the given mutator and no reward shaping.
    pub fn new(mutator: MutatorKind) -> Self {
        Self {
            mutator,
            rewards: Vec::new(),
            termination: TerminationKind::Never,
            truncation: TerminationKind::Timeout { max_ticks: 1800 },
        }
    }

    /// Add a weighted reward component.
    pub fn with_reward(mut self, kind: RewardKind, weight: f32) -> Self {
        self.rewards.push(RewardSpec::new(kind, weight));
        self
    }

    /// Set the terminal condition.
    pub fn with_termination(mut self, termination: TerminationKind) -> Self {
        self.termination = termination;
        self
    }

    /// Set the truncation condition.
    pub fn with_truncation(mut self, truncation: TerminationKind) -> Self {
        self.truncation = truncation;
        self
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new(MutatorKind::BallHunt)
            .with_reward(RewardKind::BallProximity, 1.0)
            .with_termination(TerminationKind::BallTouch)
    }
}

/// Result of stepping an environment once.
#[derive(Debug, Clone, Default)]
pub struct StepOutcome {
    /// Observation after the step.
    pub observation: Vec<f32>,
    /// Reward received.
    pub reward: f32,
    /// Episode terminated (goal condition resolved).
    pub terminated: bool,
    /// Episode truncated (budget spent).
    pub truncated: bool,
    /// Auxiliary diagnostics from the simulation. Opaque to the
    /// curriculum; carried for downstream consumers only.
    pub info: BTreeMap<String, f32>,
}

/// One worker's simulation instance.
///
/// Implementations wrap the external physics engine. The task accessors
/// exist so the curriculum can sync its per-worker manager copy from
/// the environment at episode boundaries, and so promotion broadcasts
/// have somewhere durable to land.
pub trait Environment: Send {
    /// Reset to a fresh episode and return the first observation.
    fn reset(&mut self, seed: u64) -> Vec<f32>;

    /// Advance one step.
    fn step(&mut self, action: &Action) -> StepOutcome;

    /// Task index this environment is currently configured for.
    fn current_task(&self) -> usize;

    /// Overwrite the task index (called when a promotion lands).
    fn set_task(&mut self, task: usize);

    /// Apply a scenario's configuration. Must be called before `reset`
    /// for the configuration to take effect on the next episode.
    fn load_config(&mut self, config: &EnvConfig);

    /// Current simulation state.
    fn state(&self) -> &GameState;
}
