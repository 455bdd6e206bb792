//! Simulation-facing data model and scenario state setup.

pub mod mutators;
pub mod state;

pub use mutators::{BallHunt, BoostGather, MutatorKind, ShootingDrill, StateMutator};
pub use state::{Car, GameState, PhysicsObject, Team};
