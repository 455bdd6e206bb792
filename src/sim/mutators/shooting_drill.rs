//! Shooting drill: ball in the attacking half, car lined up behind it.

use rand::RngCore;

use super::{uniform, StateMutator};
use crate::sim::state::{
    Car, GameState, Team, BACK_WALL_Y, BALL_MAX_SPEED, BALL_RADIUS, BALL_RESTING_HEIGHT,
    CAR_RESTING_HEIGHT, CORNER_CATHETUS_LENGTH, GOAL_CENTER_TO_POST, SIDE_WALL_X,
};

/// Places the ball between the opponent goal mouth and midfield, with
/// the shooter a short gap behind it facing the goal. Early tasks keep
/// the ball directly in front of the goal and stationary; later tasks
/// widen the spawn region, add drift, and stretch the approach gap.
#[derive(Debug, Clone)]
pub struct ShootingDrill {
    y_max: f32,
    x_max: f32,
    vx_max: f32,
    vy_max: f32,
    vz_max: f32,
    car_gap_max: f32,
}

impl ShootingDrill {
    /// Stages over which difficulty interpolates to maximum.
    pub const CURRICULUM_STEPS: usize = 50;

    const Y_START: f32 = BACK_WALL_Y - 8.0 * BALL_RADIUS;
    const Y_END: f32 = 0.0;
    const X_START: f32 = GOAL_CENTER_TO_POST;
    const X_END: f32 = SIDE_WALL_X - CORNER_CATHETUS_LENGTH;

    const VZ_END: f32 = BALL_MAX_SPEED / 10.0;
    const VX_END: f32 = Self::VZ_END / 2.0;
    const VY_END: f32 = Self::VZ_END / 2.0;

    const CAR_GAP_START: f32 = BALL_RADIUS * 2.0 * 4.0;
    const CAR_GAP_END: f32 = BALL_RADIUS * 2.0 * 12.0;

    /// Create a shooting drill at task 0 difficulty.
    pub fn new() -> Self {
        let mut mutator = Self {
            y_max: 0.0,
            x_max: 0.0,
            vx_max: 0.0,
            vy_max: 0.0,
            vz_max: 0.0,
            car_gap_max: 0.0,
        };
        mutator.reset(0);
        mutator
    }

    fn fraction(task: usize) -> f32 {
        (task as f32 / Self::CURRICULUM_STEPS as f32).min(1.0)
    }
}

impl Default for ShootingDrill {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMutator for ShootingDrill {
    fn reset(&mut self, task: usize) {
        let f = Self::fraction(task);
        self.y_max = Self::Y_START + (Self::Y_END - Self::Y_START) * f;
        self.x_max = Self::X_START + (Self::X_END - Self::X_START) * f;
        self.vz_max = Self::VZ_END * f;
        self.vx_max = Self::VX_END * f;
        self.vy_max = Self::VY_END * f;
        self.car_gap_max = Self::CAR_GAP_START + (Self::CAR_GAP_END - Self::CAR_GAP_START) * f;
    }

    fn apply(&self, state: &mut GameState, rng: &mut dyn RngCore) {
        state.goal_scored = false;
        state.tick_count = 0;

        let y = uniform(rng, self.y_max, Self::Y_START);
        // Keep wide spawns shootable: the further from the back wall,
        // the wider the lane into the goal mouth.
        let x_max = self.x_max.min(GOAL_CENTER_TO_POST + (BACK_WALL_Y - y));
        state.ball.position = [uniform(rng, -x_max, x_max), y, BALL_RESTING_HEIGHT];
        state.ball.linear_velocity = [
            uniform(rng, 0.0, self.vx_max),
            uniform(rng, 0.0, self.vy_max),
            uniform(rng, 0.0, self.vz_max),
        ];
        state.ball.angular_velocity = [0.0; 3];

        let mut car = Car::default_spawn(Team::Blue);
        let car_gap = uniform(rng, Self::CAR_GAP_START, self.car_gap_max);
        car.physics.position = [
            state.ball.position[0],
            state.ball.position[1] - car_gap,
            CAR_RESTING_HEIGHT,
        ];
        // Facing straight down-field at the goal.
        car.physics.forward = [0.0, 1.0, 0.0];
        car.boost_amount = uniform(rng, 0.0, 100.0);

        state.cars.clear();
        state.cars.insert("blue-0".to_string(), car);
    }
}
