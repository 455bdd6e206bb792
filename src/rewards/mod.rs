//! Per-step reward shaping functions.
//!
//! Reward functions are stateless between episodes except where noted;
//! each is reset with the initial state before the first step. Rewards
//! are produced per agent, keyed by agent id, and combined by weight
//! according to the active scenario's `EnvConfig`.

mod ball_proximity;
mod boost_delta;
mod boost_pad_proximity;
mod can_flip;
mod facing_ball;
mod speed_to_ball;

pub use ball_proximity::BallProximity;
pub use boost_delta::BoostDelta;
pub use boost_pad_proximity::BoostPadProximity;
pub use can_flip::CanFlip;
pub use facing_ball::FacingBall;
pub use speed_to_ball::SpeedToBall;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::sim::state::GameState;

/// Produces one shaping reward per agent for the current state.
pub trait RewardFunction: Send {
    /// Prepare for a new episode.
    fn reset(&mut self, initial_state: &GameState);

    /// Reward for every agent present in `state`.
    fn get_rewards(&mut self, state: &GameState) -> BTreeMap<String, f32>;
}

/// Serializable reward selector carried inside an `EnvConfig`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RewardKind {
    /// Exponential falloff with distance to the ball.
    BallProximity,
    /// Alignment of the car's nose with the ball direction.
    FacingBall,
    /// Alignment of the car's velocity with the ball direction.
    SpeedToBall,
    /// Flip availability.
    CanFlip,
    /// Pad-size-weighted proximity to boost pads.
    BoostPadProximity,
    /// Boost gained since the previous step.
    BoostDelta,
}

impl RewardKind {
    /// Instantiate the reward function this selector names.
    pub fn build(&self) -> Box<dyn RewardFunction> {
        match self {
            RewardKind::BallProximity => Box::new(BallProximity::new()),
            RewardKind::FacingBall => Box::new(FacingBall),
            RewardKind::SpeedToBall => Box::new(SpeedToBall),
            RewardKind::CanFlip => Box::new(CanFlip),
            RewardKind::BoostPadProximity => Box::new(BoostPadProximity::new()),
            RewardKind::BoostDelta => Box::new(BoostDelta::new()),
        }
    }
}

/// One weighted reward component of an `EnvConfig`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardSpec {
    /// Which reward function to use.
    pub kind: RewardKind,
    /// Weight applied to its output.
    pub weight: f32,
}

impl RewardSpec {
    /// Create a weighted reward component.
    pub fn new(kind: RewardKind, weight: f32) -> Self {
        Self { kind, weight }
    }
}

/// Weighted sum of reward components.
pub struct CombinedReward {
    components: Vec<(f32, Box<dyn RewardFunction>)>,
}

impl CombinedReward {
    /// Build the combined reward described by `specs`.
    pub fn from_specs(specs: &[RewardSpec]) -> Self {
        Self {
            components: specs
                .iter()
                .map(|spec| (spec.weight, spec.kind.build()))
                .collect(),
        }
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether there are no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl RewardFunction for CombinedReward {
    fn reset(&mut self, initial_state: &GameState) {
        for (_, component) in &mut self.components {
            component.reset(initial_state);
        }
    }

    fn get_rewards(&mut self, state: &GameState) -> BTreeMap<String, f32> {
        let mut totals: BTreeMap<String, f32> =
            state.agents().map(|agent| (agent.clone(), 0.0)).collect();
        for (weight, component) in &mut self.components {
            for (agent, reward) in component.get_rewards(state) {
                if let Some(total) = totals.get_mut(&agent) {
                    *total += *weight * reward;
                }
            }
        }
        totals
    }
}
