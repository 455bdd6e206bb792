//! Reward surface that pulls cars towards boost pads.

use std::collections::BTreeMap;

use super::RewardFunction;
use crate::sim::state::{
    GameState, BIG_PAD_AMOUNT, BIG_PAD_INDICES, BOOST_LOCATIONS, SMALL_PAD_AMOUNT,
};

/// Sum over all pads of `sqrt(amount / 100) * exp(-0.002 * d)` where
/// `d` is the planar distance from the car to the pad. Big pads weigh
/// `sqrt(1.0)`, small pads `sqrt(0.12)`, so the surface peaks over the
/// six corner/midfield big pads.
#[derive(Debug, Clone)]
pub struct BoostPadProximity {
    pad_weights: [f32; BOOST_LOCATIONS.len()],
}

impl BoostPadProximity {
    /// Create with the standard pad layout.
    pub fn new() -> Self {
        let mut pad_weights = [(SMALL_PAD_AMOUNT / 100.0).sqrt(); BOOST_LOCATIONS.len()];
        for &idx in &BIG_PAD_INDICES {
            pad_weights[idx] = (BIG_PAD_AMOUNT / 100.0).sqrt();
        }
        Self { pad_weights }
    }

    /// Evaluate the surface at a planar position.
    pub fn surface_at(&self, x: f32, y: f32) -> f32 {
        BOOST_LOCATIONS
            .iter()
            .zip(self.pad_weights.iter())
            .map(|(pad, weight)| {
                let dx = pad[0] - x;
                let dy = pad[1] - y;
                let d = (dx * dx + dy * dy).sqrt();
                weight * (-0.002 * d).exp()
            })
            .sum()
    }
}

impl Default for BoostPadProximity {
    fn default() -> Self {
        Self::new()
    }
}

impl RewardFunction for BoostPadProximity {
    fn reset(&mut self, _initial_state: &GameState) {}

    fn get_rewards(&mut self, state: &GameState) -> BTreeMap<String, f32> {
        state
            .cars
            .iter()
            .map(|(agent, car)| {
                let [x, y, _] = car.physics.position;
                (agent.clone(), self.surface_at(x, y))
            })
            .collect()
    }
}
