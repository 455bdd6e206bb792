use std::sync::Arc;

use parking_lot::Mutex;

use crate::curriculum::{metric_key, scoring, Curriculum, CurriculumError, CurriculumManager, Scenario};
use crate::driver::PromotionDriver;
use crate::environment::{EnvConfig, Environment, StepOutcome};
use crate::messages::{CoordinatorMsg, FinishReason};
use crate::metrics::{metrics_aggregator, SharedMetricsAggregator};
use crate::policy::Policy;
use crate::sim::state::GameState;
use crate::trace::{Action, EpisodeTrace, Transition};

use super::hooks::{CurriculumHook, EpisodeContext, EpisodeHook, EpisodeStatsHook, HookSet};
use super::worker::{Worker, WorkerConfig};

/// Environment that terminates after a fixed number of steps and marks
/// a ball touch on termination, so `ball_touched` always scores 1.0.
struct StubEnv {
    task: usize,
    state: GameState,
    episode_len: usize,
    step: usize,
    loaded: Option<EnvConfig>,
}

impl StubEnv {
    fn new(episode_len: usize) -> Self {
        Self {
            task: 0,
            state: GameState::new(),
            episode_len,
            step: 0,
            loaded: None,
        }
    }
}

impl Environment for StubEnv {
    fn reset(&mut self, _seed: u64) -> Vec<f32> {
        self.step = 0;
        let mut state = GameState::new();
        state.cars.insert(
            "blue-0".to_string(),
            crate::sim::state::Car::default_spawn(crate::sim::state::Team::Blue),
        );
        self.state = state;
        vec![0.0; 4]
    }

    fn step(&mut self, _action: &Action) -> StepOutcome {
        self.step += 1;
        let terminated = self.step >= self.episode_len;
        if terminated {
            for car in self.state.cars.values_mut() {
                car.ball_touches += 1;
            }
        }
        StepOutcome {
            observation: vec![self.step as f32; 4],
            reward: 1.0,
            terminated,
            truncated: false,
            info: Default::default(),
        }
    }

    fn current_task(&self) -> usize {
        self.task
    }

    fn set_task(&mut self, task: usize) {
        self.task = task;
    }

    fn load_config(&mut self, config: &EnvConfig) {
        self.loaded = Some(config.clone());
    }

    fn state(&self) -> &GameState {
        &self.state
    }
}

struct ConstPolicy;

impl Policy for ConstPolicy {
    fn act(&mut self, _observation: &[f32]) -> Action {
        Action::Discrete(0)
    }
}

fn scenario(name: &str, threshold: Option<f32>) -> Scenario {
    Scenario::new(
        name,
        EnvConfig::default(),
        threshold,
        Arc::new(scoring::ball_touched),
    )
}

fn manager_with(stages: Vec<Vec<Scenario>>) -> CurriculumManager {
    CurriculumManager::new(Arc::new(Curriculum::new(stages).unwrap()))
}

struct RecorderHook {
    name: &'static str,
    events: Arc<Mutex<Vec<String>>>,
}

impl EpisodeHook for RecorderHook {
    fn on_episode_start(
        &mut self,
        _env: &mut dyn Environment,
        _ctx: &mut EpisodeContext,
    ) -> Result<(), CurriculumError> {
        self.events.lock().push(format!("{}-start", self.name));
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        _env: &dyn Environment,
        _trace: &EpisodeTrace,
    ) -> Result<(), CurriculumError> {
        self.events.lock().push(format!("{}-end", self.name));
        Ok(())
    }
}

#[test]
fn test_hooks_dispatch_in_registration_order() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let mut hooks = HookSet::new()
        .add(RecorderHook {
            name: "a",
            events: events.clone(),
        })
        .add(RecorderHook {
            name: "b",
            events: events.clone(),
        });

    let mut env = StubEnv::new(1);
    let mut ctx = EpisodeContext::new(0);
    hooks.on_episode_start(&mut env, &mut ctx).unwrap();
    hooks
        .on_episode_end(&env, &EpisodeTrace::new("s", 0))
        .unwrap();

    assert_eq!(
        *events.lock(),
        vec!["a-start", "b-start", "a-end", "b-end"]
    );
}

#[test]
fn test_curriculum_hook_configures_environment() {
    let manager = manager_with(vec![vec![scenario("touch", Some(0.9))]]);
    let aggregator = metrics_aggregator();
    let mut hook = CurriculumHook::new(manager, aggregator.clone());

    let mut env = StubEnv::new(3);
    env.set_task(0);
    let mut ctx = EpisodeContext::new(env.current_task());
    hook.on_episode_start(&mut env, &mut ctx).unwrap();

    assert_eq!(ctx.task, 0);
    assert_eq!(ctx.scenario.as_deref(), Some("touch"));
    assert!(env.loaded.is_some());
}

#[test]
fn test_curriculum_hook_stamps_task_before_sampling() {
    let manager = manager_with(vec![
        vec![scenario("touch", Some(0.9))],
        vec![scenario("shoot", Some(0.9))],
    ]);
    let mut hook = CurriculumHook::new(manager, metrics_aggregator());

    // A promotion already landed in the environment; the hook must
    // carry that task into the context and sample from its stage.
    let mut env = StubEnv::new(3);
    env.set_task(1);
    let mut ctx = EpisodeContext::new(env.current_task());
    hook.on_episode_start(&mut env, &mut ctx).unwrap();

    assert_eq!(ctx.task, 1);
    assert_eq!(ctx.scenario.as_deref(), Some("shoot"));
    assert_eq!(hook.manager().current_task(), 1);
}

#[test]
fn test_episode_stats_hook_logs_per_drill_metrics() {
    let aggregator = metrics_aggregator();
    let mut hook = EpisodeStatsHook::new(aggregator.clone());

    let mut env = StubEnv::new(1);
    env.reset(0);
    // Terminates immediately, which marks a ball touch.
    env.step(&Action::Discrete(0));

    let mut trace = EpisodeTrace::new("touch", 0);
    trace.push(Transition {
        observation: vec![0.0; 4],
        action: Action::Discrete(0),
        reward: 1.5,
        terminal: true,
        truncated: false,
    });
    hook.on_episode_end(&env, &trace).unwrap();

    assert_eq!(aggregator.peek("touch_episode_reward", -1.0), 1.5);
    assert_eq!(aggregator.peek("touch_episode_length", -1.0), 1.0);
    assert_eq!(aggregator.peek("touch_ball_touched", -1.0), 1.0);
    assert_eq!(aggregator.peek("touch_goal_scored", -1.0), 0.0);
}

#[test]
fn test_curriculum_hook_scores_episode() {
    let manager = manager_with(vec![vec![scenario("touch", Some(0.9))]]);
    let aggregator = metrics_aggregator();
    let mut hook = CurriculumHook::new(manager, aggregator.clone());

    let mut env = StubEnv::new(1);
    let mut ctx = EpisodeContext::new(0);
    hook.on_episode_start(&mut env, &mut ctx).unwrap();
    env.reset(0);
    env.step(&Action::Discrete(0));

    let trace = EpisodeTrace::new("touch", 0);
    hook.on_episode_end(&env, &trace).unwrap();

    assert_eq!(aggregator.peek(&metric_key(0, "touch"), f32::NEG_INFINITY), 1.0);
}

#[test]
fn test_curriculum_hook_completion_surfaces_out_of_range() {
    let manager = manager_with(vec![vec![scenario("touch", Some(0.9))]]);
    let aggregator = metrics_aggregator();
    let mut hook = CurriculumHook::new(manager, aggregator);

    let mut env = StubEnv::new(1);
    env.set_task(1);
    let mut ctx = EpisodeContext::new(env.current_task());
    let result = hook.on_episode_start(&mut env, &mut ctx);
    assert!(matches!(result, Err(CurriculumError::OutOfRange { .. })));
}

fn spawn_worker(
    config: WorkerConfig,
    manager: CurriculumManager,
    aggregator: SharedMetricsAggregator,
    driver: &mut PromotionDriver,
    coord_tx: crossbeam_channel::Sender<CoordinatorMsg>,
) -> super::worker::WorkerHandle {
    let hooks = HookSet::new().add(CurriculumHook::new(manager, aggregator));
    let slot = driver.register_worker();
    Worker::new(config).spawn(StubEnv::new(3), ConstPolicy, hooks, slot, coord_tx)
}

#[test]
fn test_worker_runs_episodes_and_reports() {
    let aggregator = metrics_aggregator();
    let manager = manager_with(vec![
        vec![scenario("touch", Some(0.9))],
        vec![scenario("shoot", Some(0.9))],
    ]);
    let mut driver = PromotionDriver::new(manager.clone(), aggregator.clone());
    let (coord_tx, coord_rx) = crossbeam_channel::unbounded();

    let handle = spawn_worker(
        WorkerConfig::for_worker(0).with_max_episodes(5),
        manager,
        aggregator.clone(),
        &mut driver,
        coord_tx,
    );
    handle.join().unwrap();

    let mut reports = 0;
    let mut finished = false;
    while let Ok(msg) = coord_rx.try_recv() {
        match msg {
            CoordinatorMsg::EpisodeReport {
                task,
                scenario,
                reward,
                steps,
                ..
            } => {
                reports += 1;
                assert_eq!(task, 0);
                assert_eq!(scenario, "touch");
                assert_eq!(steps, 3);
                assert_eq!(reward, 3.0);
            }
            CoordinatorMsg::WorkerFinished { reason, .. } => {
                assert!(matches!(reason, FinishReason::Stopped));
                finished = true;
            }
            CoordinatorMsg::WorkerStats(_) => {}
        }
    }
    assert_eq!(reports, 5);
    assert!(finished);

    // Every episode touched the ball, so the stage score is 1.0.
    assert_eq!(aggregator.peek(&metric_key(0, "touch"), f32::NEG_INFINITY), 1.0);
    assert!(driver.run_cycle().promoted);
}

#[test]
fn test_worker_promotes_through_full_curriculum() {
    let aggregator = metrics_aggregator();
    let manager = manager_with(vec![
        vec![scenario("touch", Some(0.9))],
        vec![scenario("shoot", Some(0.9))],
    ]);
    let mut driver = PromotionDriver::new(manager.clone(), aggregator.clone());
    let (coord_tx, coord_rx) = crossbeam_channel::unbounded();

    let handle = spawn_worker(
        WorkerConfig::for_worker(0),
        manager,
        aggregator,
        &mut driver,
        coord_tx,
    );

    // Drive promotion decisions off episode reports until the worker
    // falls off the end of the curriculum.
    let mut seen_tasks = Vec::new();
    loop {
        match coord_rx.recv().unwrap() {
            CoordinatorMsg::EpisodeReport { task, .. } => {
                if seen_tasks.last() != Some(&task) {
                    seen_tasks.push(task);
                }
                driver.run_cycle();
            }
            CoordinatorMsg::WorkerFinished { reason, .. } => {
                assert!(matches!(reason, FinishReason::Completed));
                break;
            }
            CoordinatorMsg::WorkerStats(_) => {}
        }
    }
    handle.join().unwrap();

    assert!(driver.is_complete());
    assert_eq!(seen_tasks, vec![0, 1]);
}

#[test]
fn test_worker_stop_command() {
    let aggregator = metrics_aggregator();
    let manager = manager_with(vec![vec![scenario("touch", Some(2.0))]]);
    let mut driver = PromotionDriver::new(manager.clone(), aggregator.clone());
    let (coord_tx, coord_rx) = crossbeam_channel::unbounded();

    let handle = spawn_worker(
        WorkerConfig::for_worker(0),
        manager,
        aggregator,
        &mut driver,
        coord_tx,
    );

    // Let at least one episode through, then stop.
    loop {
        if let CoordinatorMsg::EpisodeReport { .. } = coord_rx.recv().unwrap() {
            break;
        }
    }
    handle.stop();
    handle.join().unwrap();

    let finished = std::iter::from_fn(|| coord_rx.try_recv().ok()).any(|msg| {
        matches!(
            msg,
            CoordinatorMsg::WorkerFinished {
                reason: FinishReason::Stopped,
                ..
            }
        )
    });
    assert!(finished);
}
