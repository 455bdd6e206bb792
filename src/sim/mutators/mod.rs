//! Initial-state mutators for scenario setup.
//!
//! A mutator writes the starting `GameState` for one episode. Mutators
//! are task-aware: `reset(task)` interpolates spawn geometry between an
//! easy and a hard configuration so the same drill scales with the
//! curriculum stage, then `apply` draws a concrete state.

mod ball_hunt;
mod boost_gather;
mod shooting_drill;

pub use ball_hunt::BallHunt;
pub use boost_gather::BoostGather;
pub use shooting_drill::ShootingDrill;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::state::GameState;

/// Writes the initial state for one episode.
pub trait StateMutator: Send {
    /// Recompute difficulty parameters for the given task index.
    ///
    /// Called once per episode, before `apply`.
    fn reset(&mut self, task: usize);

    /// Overwrite `state` with a freshly drawn starting configuration.
    fn apply(&self, state: &mut GameState, rng: &mut dyn RngCore);
}

/// Serializable mutator selector carried inside an `EnvConfig`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MutatorKind {
    /// Chase a drifting ball from a randomized spawn.
    BallHunt,
    /// Shoot a slowly rolling ball into the opponent goal.
    ShootingDrill,
    /// Collect boost pads from an airborne spawn.
    BoostGather,
}

impl MutatorKind {
    /// Instantiate the mutator this selector names.
    pub fn build(&self) -> Box<dyn StateMutator> {
        match self {
            MutatorKind::BallHunt => Box::new(BallHunt::new()),
            MutatorKind::ShootingDrill => Box::new(ShootingDrill::new()),
            MutatorKind::BoostGather => Box::new(BoostGather::new()),
        }
    }
}

/// Uniform draw that tolerates a degenerate range (lo == hi at task 0).
pub(crate) fn uniform(rng: &mut dyn RngCore, lo: f32, hi: f32) -> f32 {
    use rand::Rng;
    if hi <= lo {
        lo
    } else {
        rng.gen_range(lo..hi)
    }
}
