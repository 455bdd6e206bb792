//! Staged curriculum progression.
//!
//! A curriculum is an ordered list of stages, each holding one or more
//! scenarios. Training sits at one stage at a time; every episode runs
//! a scenario sampled from that stage, gets scored, and the aggregated
//! per-scenario scores drive the promotion decision. When every
//! thresholded scenario of the stage meets its threshold, the task
//! index advances by one.
//!
//! ## Components
//!
//! - [`Curriculum`] / [`Stage`] / [`Scenario`]: the static definition
//! - [`CurriculumManager`]: per-owner progression state machine
//! - [`scoring`]: canonical scoring functions
//!
//! The manager is deliberately cheap to clone. Each worker carries its
//! own copy and treats its environment as the source of truth for the
//! task index; only the central copy ever promotes.

pub mod manager;
pub mod scenario;
pub mod scoring;

pub use manager::{CurriculumError, CurriculumManager};
pub use scenario::{metric_key, Curriculum, Scenario, ScoringFn, Stage};
