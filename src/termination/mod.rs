//! Episode termination and truncation conditions.
//!
//! Terminal conditions end an episode because its goal condition was
//! resolved (touch achieved, goal scored); truncation conditions cut it
//! short on a budget (tick timeout). Both sides of an `EnvConfig` use
//! the same trait.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::sim::state::GameState;

/// Decides, per agent, whether the episode is over.
pub trait TerminalCondition: Send {
    /// Prepare for a new episode.
    fn reset(&mut self, initial_state: &GameState);

    /// Done flag for every agent present in `state`.
    fn is_done(&mut self, state: &GameState) -> BTreeMap<String, bool>;

    /// Whether every agent is done (false for an empty state).
    fn all_done(&mut self, state: &GameState) -> bool {
        let flags = self.is_done(state);
        !flags.is_empty() && flags.values().all(|&done| done)
    }
}

/// Serializable condition selector carried inside an `EnvConfig`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TerminationKind {
    /// Done once the agent has touched the ball.
    BallTouch,
    /// Done once a goal has been scored.
    Goal,
    /// Done after a fixed number of simulation ticks.
    Timeout {
        /// Tick budget for the episode.
        max_ticks: u64,
    },
    /// Never done (placeholder side of a config).
    Never,
}

impl TerminationKind {
    /// Instantiate the condition this selector names.
    pub fn build(&self) -> Box<dyn TerminalCondition> {
        match self {
            TerminationKind::BallTouch => Box::new(BallTouchTermination),
            TerminationKind::Goal => Box::new(GoalCondition),
            TerminationKind::Timeout { max_ticks } => Box::new(TimeoutCondition::new(*max_ticks)),
            TerminationKind::Never => Box::new(NeverCondition),
        }
    }
}

/// Terminate an agent once it has touched the ball.
#[derive(Debug, Clone, Copy, Default)]
pub struct BallTouchTermination;

impl TerminalCondition for BallTouchTermination {
    fn reset(&mut self, _initial_state: &GameState) {}

    fn is_done(&mut self, state: &GameState) -> BTreeMap<String, bool> {
        state
            .cars
            .iter()
            .map(|(agent, car)| (agent.clone(), car.ball_touches > 0))
            .collect()
    }
}

/// Terminate everyone once a goal is scored.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalCondition;

impl TerminalCondition for GoalCondition {
    fn reset(&mut self, _initial_state: &GameState) {}

    fn is_done(&mut self, state: &GameState) -> BTreeMap<String, bool> {
        state
            .agents()
            .map(|agent| (agent.clone(), state.goal_scored))
            .collect()
    }
}

/// Truncate everyone after a fixed tick budget.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutCondition {
    max_ticks: u64,
}

impl TimeoutCondition {
    /// Create with the given tick budget.
    pub fn new(max_ticks: u64) -> Self {
        Self { max_ticks }
    }
}

impl TerminalCondition for TimeoutCondition {
    fn reset(&mut self, _initial_state: &GameState) {}

    fn is_done(&mut self, state: &GameState) -> BTreeMap<String, bool> {
        let expired = state.tick_count >= self.max_ticks;
        state
            .agents()
            .map(|agent| (agent.clone(), expired))
            .collect()
    }
}

/// Never signals done.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCondition;

impl TerminalCondition for NeverCondition {
    fn reset(&mut self, _initial_state: &GameState) {}

    fn is_done(&mut self, state: &GameState) -> BTreeMap<String, bool> {
        state.agents().map(|agent| (agent.clone(), false)).collect()
    }
}
