//! Structured episode traces.
//!
//! A trace records every transition of one episode together with the
//! provenance of its configuration: which scenario (and task index)
//! set the episode up. Scoring validates that provenance so an episode
//! can never be scored against a scenario other than the one that
//! configured it.

use std::collections::VecDeque;

/// Action representation (discrete or continuous).
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Discrete action index
    Discrete(u32),
    /// Continuous action vector
    Continuous(Vec<f32>),
}

impl Action {
    /// Get discrete action index, panics if continuous.
    pub fn as_discrete(&self) -> u32 {
        match self {
            Action::Discrete(a) => *a,
            Action::Continuous(_) => panic!("Expected discrete action"),
        }
    }

    /// Get continuous action vector, panics if discrete.
    pub fn as_continuous(&self) -> &[f32] {
        match self {
            Action::Discrete(_) => panic!("Expected continuous action"),
            Action::Continuous(a) => a,
        }
    }
}

/// One environment step.
#[derive(Debug, Clone)]
pub struct Transition {
    /// Observation the action was chosen from.
    pub observation: Vec<f32>,
    /// Action taken.
    pub action: Action,
    /// Reward received.
    pub reward: f32,
    /// Episode terminated (goal reached, touch achieved, etc.).
    pub terminal: bool,
    /// Episode truncated (time limit).
    pub truncated: bool,
}

impl Transition {
    /// Whether the episode ended at this step.
    pub fn done(&self) -> bool {
        self.terminal || self.truncated
    }
}

/// All transitions of one episode, stamped with the scenario and task
/// that configured it.
#[derive(Debug, Clone)]
pub struct EpisodeTrace {
    /// Name of the scenario whose config set this episode up.
    pub scenario: String,
    /// Task index the worker was on when the episode started.
    pub task: usize,
    /// Per-step transitions in order.
    pub transitions: Vec<Transition>,
}

impl EpisodeTrace {
    /// Start an empty trace for the given scenario and task.
    pub fn new(scenario: impl Into<String>, task: usize) -> Self {
        Self {
            scenario: scenario.into(),
            task,
            transitions: Vec::new(),
        }
    }

    /// Append a transition.
    pub fn push(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    /// Number of steps taken.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether no steps have been taken.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Sum of step rewards.
    pub fn total_reward(&self) -> f32 {
        self.transitions.iter().map(|t| t.reward).sum()
    }

    /// Last transition, if any.
    pub fn last(&self) -> Option<&Transition> {
        self.transitions.last()
    }

    /// Mutable last transition, if any.
    pub fn last_mut(&mut self) -> Option<&mut Transition> {
        self.transitions.last_mut()
    }

    /// Whether the recorded episode reached a done flag.
    pub fn done(&self) -> bool {
        self.last().map(Transition::done).unwrap_or(false)
    }
}

/// Bounded window of recently completed traces, oldest evicted first.
///
/// Scoring functions that smooth over multiple episodes read this
/// window; it is per-worker and never shared.
#[derive(Debug, Clone)]
pub struct TraceWindow {
    capacity: usize,
    traces: VecDeque<EpisodeTrace>,
}

impl TraceWindow {
    /// Create a window holding at most `capacity` traces.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            traces: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a finished trace, evicting the oldest if full.
    pub fn push(&mut self, trace: EpisodeTrace) {
        if self.capacity == 0 {
            return;
        }
        if self.traces.len() == self.capacity {
            self.traces.pop_front();
        }
        self.traces.push_back(trace);
    }

    /// Number of retained traces.
    pub fn len(&self) -> usize {
        self.traces.len()
    }

    /// Whether the window is empty.
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Retained traces, oldest first.
    pub fn as_slice(&mut self) -> &[EpisodeTrace] {
        self.traces.make_contiguous();
        self.traces.as_slices().0
    }
}
