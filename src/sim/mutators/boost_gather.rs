//! Boost-gather drill: an airborne, empty-boost car tossed somewhere
//! over the field, ball parked at the center.

use rand::RngCore;

use super::{uniform, StateMutator};
use crate::sim::state::{
    Car, GameState, Team, BACK_WALL_Y, BALL_RADIUS, BALL_RESTING_HEIGHT, SIDE_WALL_X,
};

/// Spawn parameters for the boost-gather drill. Unlike the ball drills
/// this one is not task-interpolated; the spawn envelope is fixed at
/// construction.
#[derive(Debug, Clone)]
pub struct BoostGather {
    min_car_height: f32,
    max_car_height: f32,
    max_car_yeet: f32,
}

impl BoostGather {
    /// Create a boost-gather mutator with the default spawn envelope.
    pub fn new() -> Self {
        Self {
            min_car_height: 34.0,
            max_car_height: 10.0 * 34.0,
            max_car_yeet: 1000.0,
        }
    }

    /// Set the car spawn height range.
    pub fn with_height_range(mut self, min: f32, max: f32) -> Self {
        self.min_car_height = min;
        self.max_car_height = max;
        self
    }

    /// Set the maximum initial speed imparted to the car.
    pub fn with_max_yeet(mut self, speed: f32) -> Self {
        self.max_car_yeet = speed;
        self
    }
}

impl Default for BoostGather {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMutator for BoostGather {
    fn reset(&mut self, _task: usize) {}

    fn apply(&self, state: &mut GameState, rng: &mut dyn RngCore) {
        state.goal_scored = false;
        state.tick_count = 0;

        state.ball.position = [0.0, 0.0, BALL_RESTING_HEIGHT];
        state.ball.linear_velocity = [0.0; 3];
        state.ball.angular_velocity = [0.0; 3];

        let mut car = Car::default_spawn(Team::Blue);
        let x_max = SIDE_WALL_X - 10.0 * BALL_RADIUS;
        let y_max = BACK_WALL_Y - 10.0 * BALL_RADIUS;
        car.physics.position = [
            uniform(rng, -x_max, x_max),
            uniform(rng, -y_max, y_max),
            uniform(rng, self.min_car_height, self.max_car_height),
        ];
        car.physics.linear_velocity = [
            uniform(rng, 0.0, self.max_car_yeet),
            uniform(rng, 0.0, self.max_car_yeet),
            uniform(rng, 0.0, self.max_car_yeet),
        ];
        let angle = uniform(rng, 0.0, 2.0 * std::f32::consts::PI);
        car.physics.forward = [angle.cos(), angle.sin(), 0.0];
        car.boost_amount = 0.0;
        car.on_ground = false;

        state.cars.clear();
        state.cars.insert("blue-0".to_string(), car);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_car_spawns_airborne_with_empty_boost() {
        let mutator = BoostGather::new();
        let mut state = GameState::new();
        let mut rng = rand::thread_rng();

        for _ in 0..50 {
            mutator.apply(&mut state, &mut rng);
            let car = &state.cars["blue-0"];
            assert!(car.physics.position[2] >= 34.0);
            assert!(car.physics.position[2] <= 340.0);
            assert_eq!(car.boost_amount, 0.0);
            assert!(!car.on_ground);
        }
    }

    #[test]
    fn test_ball_parked_at_center() {
        let mutator = BoostGather::new();
        let mut state = GameState::new();
        mutator.apply(&mut state, &mut rand::thread_rng());
        assert_eq!(state.ball.position, [0.0, 0.0, BALL_RESTING_HEIGHT]);
        assert_eq!(state.ball.linear_velocity, [0.0; 3]);
    }

    #[test]
    fn test_height_range_builder() {
        let mutator = BoostGather::new().with_height_range(100.0, 200.0);
        let mut state = GameState::new();
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            mutator.apply(&mut state, &mut rng);
            let z = state.cars["blue-0"].physics.position[2];
            assert!((100.0..200.0).contains(&z));
        }
    }
}
