//! Reward for moving towards the ball.

use std::collections::BTreeMap;

use super::RewardFunction;
use crate::sim::state::{dot, sub, unit, GameState};

/// Cosine of the angle between the car's velocity and the direction to
/// the ball. A stationary car scores 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeedToBall;

impl RewardFunction for SpeedToBall {
    fn reset(&mut self, _initial_state: &GameState) {}

    fn get_rewards(&mut self, state: &GameState) -> BTreeMap<String, f32> {
        state
            .cars
            .iter()
            .map(|(agent, car)| {
                let phys = car.oriented_physics();
                let ball = state.ball_for(car.team);
                let reward = match (
                    unit(&phys.linear_velocity),
                    unit(&sub(&ball.position, &phys.position)),
                ) {
                    (Some(velocity), Some(direction)) => dot(&direction, &velocity),
                    _ => 0.0,
                };
                (agent.clone(), reward)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Car, Team};

    fn state_with_moving_car(velocity: [f32; 3]) -> GameState {
        let mut state = GameState::new();
        state.ball.position = [0.0, 1000.0, 93.15];
        let mut car = Car::default_spawn(Team::Blue);
        // Ball height, so the direction to the ball is purely +y.
        car.physics.position = [0.0, 0.0, 93.15];
        car.physics.linear_velocity = velocity;
        state.cars.insert("blue-0".to_string(), car);
        state
    }

    #[test]
    fn test_moving_at_ball_is_one() {
        let state = state_with_moving_car([0.0, 1400.0, 0.0]);
        let rewards = SpeedToBall.get_rewards(&state);
        assert!((rewards["blue-0"] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_moving_away_is_minus_one() {
        let state = state_with_moving_car([0.0, -1400.0, 0.0]);
        let rewards = SpeedToBall.get_rewards(&state);
        assert!((rewards["blue-0"] + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_stationary_car_is_zero() {
        let state = state_with_moving_car([0.0, 0.0, 0.0]);
        let rewards = SpeedToBall.get_rewards(&state);
        assert_eq!(rewards["blue-0"], 0.0);
    }

    #[test]
    fn test_magnitude_independent() {
        let slow = SpeedToBall.get_rewards(&state_with_moving_car([0.0, 10.0, 0.0]));
        let fast = SpeedToBall.get_rewards(&state_with_moving_car([0.0, 2300.0, 0.0]));
        assert!((slow["blue-0"] - fast["blue-0"]).abs() < 1e-5);
    }
}
