//! Reward that grows as the car closes on the ball.

use std::collections::BTreeMap;

use super::RewardFunction;
use crate::sim::state::{dist, GameState};

/// Exponential falloff with distance: 0 at contact, approaching -1 at
/// full-field range. Negative shaping keeps "stand still far away"
/// strictly worse than approaching.
#[derive(Debug, Clone, Default)]
pub struct BallProximity {
    half_distance: f32,
}

impl BallProximity {
    /// Create with the default 2500uu falloff scale.
    pub fn new() -> Self {
        Self {
            half_distance: 2500.0,
        }
    }

    /// Map a distance to a reward in `(-1, 0]`.
    pub fn distance_to_reward(&self, distance: f32) -> f32 {
        (-distance / self.half_distance).exp2() - 1.0
    }
}

impl RewardFunction for BallProximity {
    fn reset(&mut self, _initial_state: &GameState) {}

    fn get_rewards(&mut self, state: &GameState) -> BTreeMap<String, f32> {
        state
            .cars
            .iter()
            .map(|(agent, car)| {
                let d = dist(&car.physics.position, &state.ball.position);
                (agent.clone(), self.distance_to_reward(d))
            })
            .collect()
    }
}
