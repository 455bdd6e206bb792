//! Reward for keeping a flip available.

use std::collections::BTreeMap;

use super::RewardFunction;
use crate::sim::state::GameState;

/// 1.0 while the car still has its flip, 0.0 after it is spent.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanFlip;

impl RewardFunction for CanFlip {
    fn reset(&mut self, _initial_state: &GameState) {}

    fn get_rewards(&mut self, state: &GameState) -> BTreeMap<String, f32> {
        state
            .cars
            .iter()
            .map(|(agent, car)| (agent.clone(), if car.has_flip { 1.0 } else { 0.0 }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Car, Team};

    #[test]
    fn test_flip_available_and_spent() {
        let mut state = GameState::new();
        let mut with_flip = Car::default_spawn(Team::Blue);
        with_flip.has_flip = true;
        let mut spent = Car::default_spawn(Team::Blue);
        spent.has_flip = false;
        state.cars.insert("blue-0".to_string(), with_flip);
        state.cars.insert("blue-1".to_string(), spent);

        let rewards = CanFlip.get_rewards(&state);
        assert_eq!(rewards["blue-0"], 1.0);
        assert_eq!(rewards["blue-1"], 0.0);
    }
}
