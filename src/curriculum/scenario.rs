//! Scenario and stage definitions.

use std::fmt;
use std::sync::Arc;

use crate::environment::EnvConfig;
use crate::sim::state::GameState;
use crate::trace::EpisodeTrace;

use super::manager::CurriculumError;

/// Scores one completed episode.
///
/// Receives the final environment state, the episode's trace, and a
/// window of prior traces for multi-episode smoothing. Must be pure:
/// deterministic in its inputs, no side effects. All randomness belongs
/// to the environment, never the scorer.
pub type ScoringFn = Arc<dyn Fn(&GameState, &EpisodeTrace, &[EpisodeTrace]) -> f32 + Send + Sync>;

/// A single, self-contained sub-task within a curriculum: an
/// environment configuration plus the rule for judging mastery.
///
/// Scenarios are created once at curriculum-definition time and are
/// read-only afterwards; in particular `score_threshold` never changes
/// after construction.
#[derive(Clone)]
pub struct Scenario {
    /// Unique name within its stage; used as part of the metric key.
    pub name: String,
    /// Configuration applied verbatim to the environment before reset.
    pub env_config: EnvConfig,
    /// Mastery threshold; `None` means always considered mastered.
    pub score_threshold: Option<f32>,
    scoring: ScoringFn,
}

impl Scenario {
    /// Create a scenario.
    pub fn new(
        name: impl Into<String>,
        env_config: EnvConfig,
        score_threshold: Option<f32>,
        scoring: ScoringFn,
    ) -> Self {
        Self {
            name: name.into(),
            env_config,
            score_threshold,
            scoring,
        }
    }

    /// Run the scoring function on a completed episode.
    pub fn evaluate_score(
        &self,
        state: &GameState,
        trace: &EpisodeTrace,
        prev_traces: &[EpisodeTrace],
    ) -> f32 {
        (self.scoring)(state, trace, prev_traces)
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("score_threshold", &self.score_threshold)
            .finish()
    }
}

/// One curriculum stage: the scenarios that must all be mastered
/// before the stage is complete. Order is stable.
#[derive(Debug, Clone)]
pub struct Stage {
    scenarios: Vec<Scenario>,
}

impl Stage {
    fn new(index: usize, scenarios: Vec<Scenario>) -> Result<Self, CurriculumError> {
        for (i, scenario) in scenarios.iter().enumerate() {
            if scenarios[..i].iter().any(|s| s.name == scenario.name) {
                return Err(CurriculumError::DuplicateScenario {
                    stage: index,
                    name: scenario.name.clone(),
                });
            }
        }
        Ok(Self { scenarios })
    }

    /// Scenarios in registration order.
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }
}

/// The statically defined curriculum: an ordered list of stages.
///
/// Stages are never added or removed at runtime; only the current
/// index held by a [`super::CurriculumManager`] advances.
#[derive(Debug, Clone)]
pub struct Curriculum {
    stages: Vec<Stage>,
}

impl Curriculum {
    /// Build a curriculum, validating scenario-name uniqueness within
    /// each stage.
    pub fn new(stages: Vec<Vec<Scenario>>) -> Result<Self, CurriculumError> {
        let stages = stages
            .into_iter()
            .enumerate()
            .map(|(index, scenarios)| Stage::new(index, scenarios))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { stages })
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the curriculum has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage at `index`, if defined.
    pub fn stage(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }
}

/// Metric key for one (stage, scenario) score series.
///
/// Deterministic and collision-free across stages and scenarios
/// (scenario names are unique within a stage).
pub fn metric_key(task: usize, scenario: &str) -> String {
    format!("task-{}-{}", task, scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::scoring;

    fn scenario(name: &str) -> Scenario {
        Scenario::new(
            name,
            EnvConfig::default(),
            Some(0.9),
            Arc::new(scoring::ball_touched),
        )
    }

    #[test]
    fn test_metric_key_format() {
        assert_eq!(metric_key(0, "ball-hunt"), "task-0-ball-hunt");
        assert_eq!(metric_key(12, "shooting"), "task-12-shooting");
    }

    #[test]
    fn test_metric_keys_do_not_collide_across_stages() {
        assert_ne!(metric_key(0, "a"), metric_key(1, "a"));
        assert_ne!(metric_key(0, "a"), metric_key(0, "b"));
    }

    #[test]
    fn test_duplicate_scenario_names_rejected() {
        let result = Curriculum::new(vec![vec![scenario("same"), scenario("same")]]);
        assert!(matches!(
            result,
            Err(CurriculumError::DuplicateScenario { stage: 0, .. })
        ));
    }

    #[test]
    fn test_same_name_in_different_stages_allowed() {
        let curriculum =
            Curriculum::new(vec![vec![scenario("drill")], vec![scenario("drill")]]).unwrap();
        assert_eq!(curriculum.len(), 2);
    }

    #[test]
    fn test_stage_order_is_stable() {
        let curriculum =
            Curriculum::new(vec![vec![scenario("a"), scenario("b"), scenario("c")]]).unwrap();
        let names: Vec<&str> = curriculum
            .stage(0)
            .unwrap()
            .scenarios()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
