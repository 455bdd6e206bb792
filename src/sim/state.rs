//! Game-state data model for the vehicle-soccer simulation.
//!
//! The physics engine itself is an external collaborator; this module
//! defines the state it produces and the arena geometry that reward,
//! termination and scoring code needs to interpret that state.

use std::collections::BTreeMap;

/// Half-width of the arena along the x axis.
pub const SIDE_WALL_X: f32 = 4096.0;
/// Half-length of the arena along the y axis.
pub const BACK_WALL_Y: f32 = 5120.0;
/// Arena ceiling height.
pub const CEILING_Z: f32 = 2044.0;
/// Length of the diagonal corner wall's cathetus.
pub const CORNER_CATHETUS_LENGTH: f32 = 1152.0;
/// Distance from goal center to a goal post.
pub const GOAL_CENTER_TO_POST: f32 = 892.755;
/// Ball radius.
pub const BALL_RADIUS: f32 = 92.75;
/// Resting height of the ball center above the floor.
pub const BALL_RESTING_HEIGHT: f32 = 93.15;
/// Maximum ball speed the simulation allows.
pub const BALL_MAX_SPEED: f32 = 6000.0;
/// Maximum car speed.
pub const CAR_MAX_SPEED: f32 = 2300.0;
/// Resting height of a car spawned on the floor.
pub const CAR_RESTING_HEIGHT: f32 = 17.0;

/// Positions of the 34 boost pads, in field order.
pub const BOOST_LOCATIONS: [[f32; 3]; 34] = [
    [0.0, -4240.0, 70.0],
    [-1792.0, -4184.0, 70.0],
    [1792.0, -4184.0, 70.0],
    [-3072.0, -4096.0, 73.0],
    [3072.0, -4096.0, 73.0],
    [-940.0, -3308.0, 70.0],
    [940.0, -3308.0, 70.0],
    [0.0, -2816.0, 70.0],
    [-3584.0, -2484.0, 70.0],
    [3584.0, -2484.0, 70.0],
    [-1788.0, -2300.0, 70.0],
    [1788.0, -2300.0, 70.0],
    [-2048.0, -1036.0, 70.0],
    [0.0, -1024.0, 70.0],
    [2048.0, -1036.0, 70.0],
    [-3584.0, 0.0, 73.0],
    [-1024.0, 0.0, 70.0],
    [1024.0, 0.0, 70.0],
    [3584.0, 0.0, 73.0],
    [-2048.0, 1036.0, 70.0],
    [0.0, 1024.0, 70.0],
    [2048.0, 1036.0, 70.0],
    [-1788.0, 2300.0, 70.0],
    [1788.0, 2300.0, 70.0],
    [-3584.0, 2484.0, 70.0],
    [3584.0, 2484.0, 70.0],
    [0.0, 2816.0, 70.0],
    [-940.0, 3308.0, 70.0],
    [940.0, 3308.0, 70.0],
    [-3072.0, 4096.0, 73.0],
    [3072.0, 4096.0, 73.0],
    [-1792.0, 4184.0, 70.0],
    [1792.0, 4184.0, 70.0],
    [0.0, 4240.0, 70.0],
];

/// Indices into [`BOOST_LOCATIONS`] of the six 100-boost pads.
pub const BIG_PAD_INDICES: [usize; 6] = [3, 4, 15, 18, 29, 30];

/// Boost granted by a big pad.
pub const BIG_PAD_AMOUNT: f32 = 100.0;
/// Boost granted by a small pad.
pub const SMALL_PAD_AMOUNT: f32 = 12.0;

/// Longest possible straight-line distance within the arena.
pub fn max_field_dist() -> f32 {
    ((SIDE_WALL_X * 2.0).powi(2) + (BACK_WALL_Y * 2.0).powi(2) + CEILING_Z.powi(2)).sqrt()
}

/// 3-vector difference `a - b`.
pub fn sub(a: &[f32; 3], b: &[f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// 3-vector dot product.
pub fn dot(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// 3-vector euclidean norm.
pub fn norm(a: &[f32; 3]) -> f32 {
    dot(a, a).sqrt()
}

/// Distance between two points.
pub fn dist(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    norm(&sub(a, b))
}

/// Unit vector in the direction of `a`, or `None` for the zero vector.
pub fn unit(a: &[f32; 3]) -> Option<[f32; 3]> {
    let n = norm(a);
    if n == 0.0 {
        None
    } else {
        Some([a[0] / n, a[1] / n, a[2] / n])
    }
}

/// Team assignment for a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Blue,
    Orange,
}

/// Position and motion of a rigid body in the simulation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhysicsObject {
    /// World position.
    pub position: [f32; 3],
    /// Linear velocity.
    pub linear_velocity: [f32; 3],
    /// Angular velocity.
    pub angular_velocity: [f32; 3],
    /// Unit forward vector of the body's orientation.
    pub forward: [f32; 3],
}

impl PhysicsObject {
    /// Mirror through the field center (x and y negated).
    ///
    /// Orange-team code reads state in this frame so that "towards the
    /// opponent goal" is always +y regardless of team.
    pub fn inverted(&self) -> PhysicsObject {
        let flip = |v: &[f32; 3]| [-v[0], -v[1], v[2]];
        PhysicsObject {
            position: flip(&self.position),
            linear_velocity: flip(&self.linear_velocity),
            angular_velocity: flip(&self.angular_velocity),
            forward: flip(&self.forward),
        }
    }
}

/// One vehicle in the match.
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    /// Team this car plays for.
    pub team: Team,
    /// Physical state.
    pub physics: PhysicsObject,
    /// Boost amount in `[0, 100]`.
    pub boost_amount: f32,
    /// Number of ball touches this episode.
    pub ball_touches: u32,
    /// Whether a flip is currently available.
    pub has_flip: bool,
    /// Whether the car has wheel contact.
    pub on_ground: bool,
    /// Seconds until respawn after a demolition (0 = alive).
    pub demo_respawn_timer: f32,
}

impl Car {
    /// A grounded, stationary car with empty boost, facing +x.
    pub fn default_spawn(team: Team) -> Self {
        Self {
            team,
            physics: PhysicsObject {
                position: [0.0, 0.0, CAR_RESTING_HEIGHT],
                linear_velocity: [0.0; 3],
                angular_velocity: [0.0; 3],
                forward: [1.0, 0.0, 0.0],
            },
            boost_amount: 0.0,
            ball_touches: 0,
            has_flip: true,
            on_ground: true,
            demo_respawn_timer: 0.0,
        }
    }

    /// Physics in this car's own-goal frame (inverted for orange).
    pub fn oriented_physics(&self) -> PhysicsObject {
        match self.team {
            Team::Blue => self.physics.clone(),
            Team::Orange => self.physics.inverted(),
        }
    }
}

/// Complete simulation state at one tick.
///
/// Cars are keyed by agent id (e.g. `"blue-0"`). A `BTreeMap` keeps
/// iteration order stable across workers so per-agent reward and
/// termination maps are deterministic.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    /// Cars by agent id.
    pub cars: BTreeMap<String, Car>,
    /// The ball.
    pub ball: PhysicsObject,
    /// Whether a goal was scored this episode.
    pub goal_scored: bool,
    /// Simulation ticks elapsed since reset.
    pub tick_count: u64,
}

impl GameState {
    /// Create an empty state with the ball at rest on the center spot.
    pub fn new() -> Self {
        Self {
            cars: BTreeMap::new(),
            ball: PhysicsObject {
                position: [0.0, 0.0, BALL_RESTING_HEIGHT],
                ..Default::default()
            },
            goal_scored: false,
            tick_count: 0,
        }
    }

    /// Agent ids in stable order.
    pub fn agents(&self) -> impl Iterator<Item = &String> {
        self.cars.keys()
    }

    /// Ball physics in the given team's own-goal frame.
    pub fn ball_for(&self, team: Team) -> PhysicsObject {
        match team {
            Team::Blue => self.ball.clone(),
            Team::Orange => self.ball.inverted(),
        }
    }

    /// Whether any car touched the ball this episode.
    pub fn any_ball_touch(&self) -> bool {
        self.cars.values().any(|car| car.ball_touches > 0)
    }
}
