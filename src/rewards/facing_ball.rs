//! Reward for pointing the car's nose at the ball.

use std::collections::BTreeMap;

use super::RewardFunction;
use crate::sim::state::{dot, sub, unit, GameState};

/// Cosine of the angle between the car's forward vector and the
/// direction to the ball, evaluated in each team's own frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacingBall;

impl RewardFunction for FacingBall {
    fn reset(&mut self, _initial_state: &GameState) {}

    fn get_rewards(&mut self, state: &GameState) -> BTreeMap<String, f32> {
        state
            .cars
            .iter()
            .map(|(agent, car)| {
                let phys = car.oriented_physics();
                let ball = state.ball_for(car.team);
                let to_ball = sub(&ball.position, &phys.position);
                let reward = match unit(&to_ball) {
                    Some(direction) => dot(&phys.forward, &direction),
                    None => 0.0,
                };
                (agent.clone(), reward)
            })
            .collect()
    }
}
