//! Episode lifecycle hooks.
//!
//! Hooks run at two points of the worker's episode loop: just before
//! the environment resets (configuration) and just after the episode
//! ends (scoring and bookkeeping). A [`HookSet`] dispatches to its
//! hooks strictly in registration order, so curriculum configuration
//! always runs before anything that depends on it.

use crate::curriculum::{CurriculumError, CurriculumManager};
use crate::environment::Environment;
use crate::metrics::SharedMetricsAggregator;
use crate::trace::{EpisodeTrace, TraceWindow};

/// Per-episode context threaded through the start hooks.
///
/// Starts out with the environment's task index; the curriculum hook
/// fills in the sampled scenario. The worker stamps both onto the
/// episode's trace so scoring can validate provenance.
#[derive(Debug, Clone)]
pub struct EpisodeContext {
    /// Task index the episode will run under.
    pub task: usize,
    /// Name of the scenario that configured the episode, once sampled.
    pub scenario: Option<String>,
}

impl EpisodeContext {
    /// Context for an episode starting at `task`, no scenario yet.
    pub fn new(task: usize) -> Self {
        Self {
            task,
            scenario: None,
        }
    }
}

/// One episode lifecycle observer.
///
/// Both methods default to no-ops so a hook can implement only the
/// side it cares about.
pub trait EpisodeHook: Send {
    /// Called before the environment resets for a new episode.
    fn on_episode_start(
        &mut self,
        env: &mut dyn Environment,
        ctx: &mut EpisodeContext,
    ) -> Result<(), CurriculumError> {
        let _ = (env, ctx);
        Ok(())
    }

    /// Called after the episode's last transition is recorded.
    fn on_episode_end(
        &mut self,
        env: &dyn Environment,
        trace: &EpisodeTrace,
    ) -> Result<(), CurriculumError> {
        let _ = (env, trace);
        Ok(())
    }
}

/// Ordered collection of hooks, dispatched sequentially.
///
/// The first error aborts the remaining hooks for that event and
/// propagates to the worker loop.
#[derive(Default)]
pub struct HookSet {
    hooks: Vec<Box<dyn EpisodeHook>>,
}

impl HookSet {
    /// Create an empty hook set.
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Append a hook. Registration order is dispatch order.
    pub fn add<H: EpisodeHook + 'static>(mut self, hook: H) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every start hook in order.
    pub fn on_episode_start(
        &mut self,
        env: &mut dyn Environment,
        ctx: &mut EpisodeContext,
    ) -> Result<(), CurriculumError> {
        for hook in &mut self.hooks {
            hook.on_episode_start(env, ctx)?;
        }
        Ok(())
    }

    /// Run every end hook in order.
    pub fn on_episode_end(
        &mut self,
        env: &dyn Environment,
        trace: &EpisodeTrace,
    ) -> Result<(), CurriculumError> {
        for hook in &mut self.hooks {
            hook.on_episode_end(env, trace)?;
        }
        Ok(())
    }
}

/// The curriculum side of the episode loop.
///
/// On start: re-sync the task index from the environment (the
/// environment is the durable source of truth at episode boundaries),
/// sample a scenario for the episode, and load its configuration into
/// the environment before reset. On end: score the episode against the
/// sampled scenario and log the score under its metric key.
pub struct CurriculumHook {
    manager: CurriculumManager,
    aggregator: SharedMetricsAggregator,
    prev_traces: TraceWindow,
}

impl CurriculumHook {
    /// Create a hook around a worker-local manager copy.
    pub fn new(manager: CurriculumManager, aggregator: SharedMetricsAggregator) -> Self {
        Self::with_trace_window(manager, aggregator, 16)
    }

    /// Create a hook retaining `window` prior traces for scoring
    /// functions that smooth over multiple episodes.
    pub fn with_trace_window(
        manager: CurriculumManager,
        aggregator: SharedMetricsAggregator,
        window: usize,
    ) -> Self {
        Self {
            manager,
            aggregator,
            prev_traces: TraceWindow::new(window),
        }
    }

    /// The worker-local manager copy.
    pub fn manager(&self) -> &CurriculumManager {
        &self.manager
    }
}

impl EpisodeHook for CurriculumHook {
    fn on_episode_start(
        &mut self,
        env: &mut dyn Environment,
        ctx: &mut EpisodeContext,
    ) -> Result<(), CurriculumError> {
        self.manager.set_task(env.current_task());
        ctx.task = self.manager.current_task();

        let scenario = self.manager.sample_scenario()?;
        env.load_config(&scenario.env_config);
        ctx.scenario = Some(scenario.name.clone());
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        env: &dyn Environment,
        trace: &EpisodeTrace,
    ) -> Result<(), CurriculumError> {
        let prev = self.prev_traces.as_slice();
        self.manager
            .record_episode(env.state(), trace, prev, &self.aggregator)?;
        self.prev_traces.push(trace.clone());
        Ok(())
    }
}

/// Logs per-scenario episode statistics (reward and length) as EMAs.
///
/// Purely observational; keys are prefixed with the scenario name and
/// never collide with promotion metric keys.
pub struct EpisodeStatsHook {
    aggregator: SharedMetricsAggregator,
    ema_coeff: f32,
}

impl EpisodeStatsHook {
    /// Create a stats hook with the default smoothing coefficient.
    pub fn new(aggregator: SharedMetricsAggregator) -> Self {
        Self {
            aggregator,
            ema_coeff: 0.2,
        }
    }
}

impl EpisodeHook for EpisodeStatsHook {
    fn on_episode_end(
        &mut self,
        env: &dyn Environment,
        trace: &EpisodeTrace,
    ) -> Result<(), CurriculumError> {
        let state = env.state();
        let log = |name: &str, value: f32| {
            self.aggregator
                .log_value_ema(&format!("{}_{}", trace.scenario, name), value, self.ema_coeff);
        };
        log("episode_reward", trace.total_reward());
        log("episode_length", trace.len() as f32);
        log("ball_touched", state.any_ball_touch() as u8 as f32);
        log("goal_scored", state.goal_scored as u8 as f32);
        Ok(())
    }
}
