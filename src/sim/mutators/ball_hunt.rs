//! Ball-hunt drill: spawn a single car near a drifting ball.

use rand::RngCore;

use super::{uniform, StateMutator};
use crate::sim::state::{
    Car, GameState, Team, BACK_WALL_Y, BALL_MAX_SPEED, BALL_RADIUS, BALL_RESTING_HEIGHT,
    CAR_RESTING_HEIGHT, CORNER_CATHETUS_LENGTH, SIDE_WALL_X,
};

/// Spawns the ball in a task-scaled region with task-scaled drift, and
/// one blue car offset from it with a task-scaled facing error.
///
/// At task 0 everything collapses to "stationary ball dead ahead";
/// by task 10 the ball can be anywhere on the field.
#[derive(Debug, Clone)]
pub struct BallHunt {
    y_max: f32,
    x_max: f32,
    angle_max: f32,
    distance_max: f32,
    speed_max: f32,
}

impl BallHunt {
    /// Stages over which difficulty interpolates to maximum.
    pub const CURRICULUM_STEPS: usize = 10;

    const Y_MAX: f32 = BACK_WALL_Y - CORNER_CATHETUS_LENGTH;
    const X_MAX: f32 = SIDE_WALL_X - CORNER_CATHETUS_LENGTH;
    const SPEED_MAX: f32 = BALL_MAX_SPEED / 5.0;

    /// Create a ball-hunt mutator at task 0 difficulty.
    pub fn new() -> Self {
        let mut mutator = Self {
            y_max: 0.0,
            x_max: 0.0,
            angle_max: 0.0,
            distance_max: 0.0,
            speed_max: 0.0,
        };
        mutator.reset(0);
        mutator
    }

    fn fraction(task: usize) -> f32 {
        (task as f32 / Self::CURRICULUM_STEPS as f32).min(1.0)
    }
}

impl Default for BallHunt {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMutator for BallHunt {
    fn reset(&mut self, task: usize) {
        let f = Self::fraction(task);
        self.y_max = Self::Y_MAX * f;
        self.x_max = Self::X_MAX * f;
        self.angle_max = std::f32::consts::PI * f;
        self.distance_max = 4.0 * BALL_RADIUS + 40.0 * BALL_RADIUS * f;
        self.speed_max = Self::SPEED_MAX * f + 1.0;
    }

    fn apply(&self, state: &mut GameState, rng: &mut dyn RngCore) {
        state.goal_scored = false;
        state.tick_count = 0;

        state.ball.position = [
            uniform(rng, -self.x_max, self.x_max),
            uniform(rng, -self.y_max, self.y_max),
            uniform(rng, BALL_RESTING_HEIGHT, BALL_RESTING_HEIGHT + BALL_RADIUS * 2.0),
        ];
        state.ball.linear_velocity = [
            uniform(rng, -self.speed_max, self.speed_max),
            uniform(rng, -self.speed_max, self.speed_max),
            uniform(rng, -self.speed_max / 2.0, self.speed_max / 2.0),
        ];
        state.ball.angular_velocity = [0.0; 3];

        let mut car = Car::default_spawn(Team::Blue);

        let [ball_x, ball_y, _] = state.ball.position;
        let car_dx = uniform(rng, 2.0 * BALL_RADIUS, self.distance_max);
        let car_dy = uniform(rng, 2.0 * BALL_RADIUS, self.distance_max);
        let bound_x = SIDE_WALL_X - CORNER_CATHETUS_LENGTH;
        let bound_y = BACK_WALL_Y - CORNER_CATHETUS_LENGTH;
        let car_x = (ball_x + car_dx).clamp(-bound_x, bound_x);
        let car_y = (ball_y + car_dy).clamp(-bound_y, bound_y);
        car.physics.position = [car_x, car_y, CAR_RESTING_HEIGHT];

        // Face towards the ball, jittered by the task-scaled error.
        let to_ball = [ball_x - car_x, ball_y - car_y];
        let mut angle = to_ball[1].atan2(to_ball[0]);
        angle = uniform(rng, angle - self.angle_max, angle + self.angle_max);
        car.physics.forward = [angle.cos(), angle.sin(), 0.0];
        car.boost_amount = uniform(rng, 0.0, 100.0);

        state.cars.clear();
        state.cars.insert("blue-0".to_string(), car);
    }
}
