//! The curriculum state machine.
//!
//! Every simulation worker owns an independent copy of the manager, and
//! the central decision loop owns one more. Copies never share mutable
//! state: promotions travel central-to-worker over the sync layer, and
//! each worker copy re-syncs its task index from its environment at
//! episode boundaries.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use rand::seq::SliceRandom;

use crate::metrics::{MetricsAggregator, Reduce};
use crate::sim::state::GameState;
use crate::trace::EpisodeTrace;

use super::scenario::{metric_key, Curriculum, Scenario};

/// Errors raised by curriculum operations.
#[derive(Debug, Clone, PartialEq)]
pub enum CurriculumError {
    /// `current_task` exceeds the defined stage count. This is the
    /// terminal "curriculum complete" condition, distinct from any
    /// configuration bug.
    OutOfRange {
        /// The offending task index.
        task: usize,
        /// Number of defined stages.
        stages: usize,
    },
    /// Two scenarios in one stage share a name (metric keys would
    /// collide).
    DuplicateScenario {
        /// Stage index containing the duplicate.
        stage: usize,
        /// The duplicated name.
        name: String,
    },
    /// An episode was scored against a different scenario than the one
    /// that configured it. A sequencing bug in the caller; scoring the
    /// wrong scenario would corrupt the promotion signal, so this is
    /// never silently recovered.
    InconsistentScenario {
        /// Name of the scenario the manager expected.
        expected: String,
        /// Scenario name stamped on the trace.
        found: String,
    },
    /// `record_episode` was called before any scenario was sampled.
    NoActiveScenario,
}

impl fmt::Display for CurriculumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurriculumError::OutOfRange { task, stages } => {
                write!(f, "task {} out of range: {} stages defined", task, stages)
            }
            CurriculumError::DuplicateScenario { stage, name } => {
                write!(f, "duplicate scenario name '{}' in stage {}", name, stage)
            }
            CurriculumError::InconsistentScenario { expected, found } => write!(
                f,
                "episode scored against scenario '{}' but was configured by '{}'",
                expected, found
            ),
            CurriculumError::NoActiveScenario => {
                write!(f, "no scenario sampled for the current episode")
            }
        }
    }
}

impl std::error::Error for CurriculumError {}

/// Tracks which scenario the next episode should use and decides when
/// it is time to advance.
///
/// `current_task` is monotonically non-decreasing and changes through
/// exactly two paths: the central decision loop promoting (then
/// broadcasting), or a worker copy syncing from its environment's task
/// counter via [`CurriculumManager::set_task`].
#[derive(Debug, Clone)]
pub struct CurriculumManager {
    curriculum: Arc<Curriculum>,
    current_task: usize,
    active_scenario: Option<Scenario>,
}

impl CurriculumManager {
    /// Create a manager at task 0 with no active scenario.
    pub fn new(curriculum: Arc<Curriculum>) -> Self {
        Self {
            curriculum,
            current_task: 0,
            active_scenario: None,
        }
    }

    /// The current task index.
    pub fn current_task(&self) -> usize {
        self.current_task
    }

    /// Whether every stage has been passed.
    pub fn is_complete(&self) -> bool {
        self.current_task >= self.curriculum.len()
    }

    /// The shared curriculum definition.
    pub fn curriculum(&self) -> &Arc<Curriculum> {
        &self.curriculum
    }

    /// Scenario sampled for the in-progress episode, if any.
    pub fn active_scenario(&self) -> Option<&Scenario> {
        self.active_scenario.as_ref()
    }

    /// Overwrite the current task.
    ///
    /// The caller (the sync layer, or the episode-start hook syncing
    /// from the environment) is trusted to only move forward or
    /// resynchronize to an already-approved value.
    pub fn set_task(&mut self, task: usize) {
        self.current_task = task;
    }

    /// Scenarios of the current stage, in stable order.
    ///
    /// `OutOfRange` signals curriculum completion.
    pub fn get_current_task_scenarios(&self) -> Result<&[Scenario], CurriculumError> {
        self.curriculum
            .stage(self.current_task)
            .map(|stage| stage.scenarios())
            .ok_or(CurriculumError::OutOfRange {
                task: self.current_task,
                stages: self.curriculum.len(),
            })
    }

    /// Choose a scenario uniformly at random from the current stage and
    /// remember it as the active scenario for this episode.
    ///
    /// Must be called exactly once per episode, before the episode
    /// starts, so the sampled configuration can be applied before the
    /// environment resets.
    pub fn sample_scenario(&mut self) -> Result<&Scenario, CurriculumError> {
        let scenario = {
            let scenarios = self.get_current_task_scenarios()?;
            scenarios
                .choose(&mut rand::thread_rng())
                .ok_or(CurriculumError::OutOfRange {
                    task: self.current_task,
                    stages: self.curriculum.len(),
                })?
                .clone()
        };
        Ok(&*self.active_scenario.insert(scenario))
    }

    /// Score a completed episode against the active scenario and log
    /// the score under the scenario's metric key.
    ///
    /// Must be called exactly once per completed episode, with the same
    /// active scenario that was sampled for it; the trace's provenance
    /// stamp is checked to enforce this. Returns the score.
    pub fn record_episode(
        &self,
        state: &GameState,
        trace: &EpisodeTrace,
        prev_traces: &[EpisodeTrace],
        aggregator: &MetricsAggregator,
    ) -> Result<f32, CurriculumError> {
        let active = self
            .active_scenario
            .as_ref()
            .ok_or(CurriculumError::NoActiveScenario)?;
        if trace.scenario != active.name || trace.task != self.current_task {
            return Err(CurriculumError::InconsistentScenario {
                expected: metric_key(self.current_task, &active.name),
                found: metric_key(trace.task, &trace.scenario),
            });
        }

        let score = active.evaluate_score(state, trace, prev_traces);
        aggregator.log_value(&self.scenario_key(active), score, Reduce::Mean);
        Ok(score)
    }

    /// Whether every thresholded scenario of the current stage meets
    /// its threshold in `results`.
    ///
    /// A missing key counts as negative infinity (not ready); a `None`
    /// threshold is vacuously satisfied. Pure query, no mutation, and
    /// missing data never raises.
    pub fn should_promote(&self, results: &HashMap<String, f32>) -> bool {
        let scenarios = match self.get_current_task_scenarios() {
            Ok(scenarios) => scenarios,
            // Past the last stage there is nothing left to promote to.
            Err(_) => return false,
        };

        for scenario in scenarios {
            let threshold = match scenario.score_threshold {
                Some(threshold) => threshold,
                None => continue,
            };
            let score = results
                .get(&self.scenario_key(scenario))
                .copied()
                .unwrap_or(f32::NEG_INFINITY);
            if score < threshold {
                return false;
            }
        }
        true
    }

    /// Advance to the next stage. Always +1, never skips, never
    /// regresses.
    pub fn promote(&mut self) {
        self.current_task += 1;
        self.active_scenario = None;
    }

    /// Metric key for a scenario at the current task.
    pub fn scenario_key(&self, scenario: &Scenario) -> String {
        metric_key(self.current_task, &scenario.name)
    }
}
