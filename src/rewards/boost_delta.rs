//! Reward for boost gained since the previous step.
//!
//! Tracks the last-seen boost amount per agent in an explicit map with
//! a defined default: an agent seen for the first time is seeded with
//! its current boost and earns nothing for that step. The map lives for
//! one episode and is rebuilt on reset.

use std::collections::BTreeMap;

use super::RewardFunction;
use crate::sim::state::GameState;

/// Positive reward proportional to boost picked up this step; spending
/// boost is not penalized.
#[derive(Debug, Clone, Default)]
pub struct BoostDelta {
    last_seen: BTreeMap<String, f32>,
}

impl BoostDelta {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self {
            last_seen: BTreeMap::new(),
        }
    }
}

impl RewardFunction for BoostDelta {
    fn reset(&mut self, initial_state: &GameState) {
        self.last_seen = initial_state
            .cars
            .iter()
            .map(|(agent, car)| (agent.clone(), car.boost_amount))
            .collect();
    }

    fn get_rewards(&mut self, state: &GameState) -> BTreeMap<String, f32> {
        state
            .cars
            .iter()
            .map(|(agent, car)| {
                let previous = self
                    .last_seen
                    .insert(agent.clone(), car.boost_amount)
                    .unwrap_or(car.boost_amount);
                let gained = (car.boost_amount - previous).max(0.0);
                (agent.clone(), gained / 100.0)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Car, Team};

    fn state_with_boost(boost: f32) -> GameState {
        let mut state = GameState::new();
        let mut car = Car::default_spawn(Team::Blue);
        car.boost_amount = boost;
        state.cars.insert("blue-0".to_string(), car);
        state
    }

    #[test]
    fn test_gain_is_rewarded() {
        let mut reward = BoostDelta::new();
        reward.reset(&state_with_boost(0.0));

        let rewards = reward.get_rewards(&state_with_boost(12.0));
        assert!((rewards["blue-0"] - 0.12).abs() < 1e-6);
    }

    #[test]
    fn test_spending_is_not_penalized() {
        let mut reward = BoostDelta::new();
        reward.reset(&state_with_boost(100.0));

        let rewards = reward.get_rewards(&state_with_boost(40.0));
        assert_eq!(rewards["blue-0"], 0.0);
    }

    #[test]
    fn test_first_sight_defaults_to_current() {
        // Agent not present at reset earns nothing the step it appears.
        let mut reward = BoostDelta::new();
        reward.reset(&GameState::new());

        let rewards = reward.get_rewards(&state_with_boost(85.0));
        assert_eq!(rewards["blue-0"], 0.0);

        // A later gain is rewarded normally.
        let rewards = reward.get_rewards(&state_with_boost(97.0));
        assert!((rewards["blue-0"] - 0.12).abs() < 1e-6);
    }

    #[test]
    fn test_reset_clears_previous_episode() {
        let mut reward = BoostDelta::new();
        reward.reset(&state_with_boost(0.0));
        let _ = reward.get_rewards(&state_with_boost(50.0));

        // New episode starting at 0 must not be compared against the
        // old episode's 50.
        reward.reset(&state_with_boost(0.0));
        let rewards = reward.get_rewards(&state_with_boost(0.0));
        assert_eq!(rewards["blue-0"], 0.0);
    }
}
