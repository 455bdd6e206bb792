//! Central promotion decision loop.
//!
//! The driver owns the authoritative curriculum manager copy. Each
//! decision cycle it reads the aggregated per-scenario scores for the
//! current stage, asks the manager whether every thresholded scenario
//! passes, and on promotion consumes the stage's scores and broadcasts
//! the new task index to every worker.
//!
//! Workers keep running old-task episodes while a broadcast is in
//! flight; their provenance-stamped traces are scored under the task
//! they started with, and consumed keys guarantee a stale score can
//! never count toward the next stage.

use std::collections::HashMap;

use crate::curriculum::CurriculumManager;
use crate::metrics::SharedMetricsAggregator;
use crate::sync::{SharedTaskSlot, TaskBroadcaster};

/// Outcome of one decision cycle.
#[derive(Debug, Clone)]
pub struct CycleResult {
    /// Decision cycle counter, 1-based.
    pub cycle: usize,
    /// Task index after this cycle's decision.
    pub curriculum_task: usize,
    /// Whether this cycle promoted.
    pub promoted: bool,
    /// Whether the curriculum is finished.
    pub complete: bool,
    /// Per-scenario aggregated scores read this cycle, in stage order.
    /// Missing series read as negative infinity.
    pub scores: Vec<(String, f32)>,
}

/// Drives promotion decisions from aggregated episode scores.
pub struct PromotionDriver {
    manager: CurriculumManager,
    broadcaster: TaskBroadcaster,
    aggregator: SharedMetricsAggregator,
    cycle: usize,
}

impl PromotionDriver {
    /// Create a driver around the authoritative manager copy.
    pub fn new(manager: CurriculumManager, aggregator: SharedMetricsAggregator) -> Self {
        Self {
            manager,
            broadcaster: TaskBroadcaster::new(),
            aggregator,
            cycle: 0,
        }
    }

    /// Register one worker and return its promotion-receive slot.
    ///
    /// Must happen before the worker spawns.
    pub fn register_worker(&mut self) -> SharedTaskSlot {
        self.broadcaster.register()
    }

    /// The authoritative manager copy.
    pub fn manager(&self) -> &CurriculumManager {
        &self.manager
    }

    /// Current task index.
    pub fn current_task(&self) -> usize {
        self.manager.current_task()
    }

    /// Whether every stage has been passed.
    pub fn is_complete(&self) -> bool {
        self.manager.is_complete()
    }

    /// Run one decision cycle.
    pub fn run_cycle(&mut self) -> CycleResult {
        self.cycle += 1;

        let keys: Vec<String> = match self.manager.get_current_task_scenarios() {
            Ok(scenarios) => scenarios
                .iter()
                .map(|s| self.manager.scenario_key(s))
                .collect(),
            // Past the last stage: terminal result, nothing to decide.
            Err(_) => {
                return CycleResult {
                    cycle: self.cycle,
                    curriculum_task: self.manager.current_task(),
                    promoted: false,
                    complete: true,
                    scores: Vec::new(),
                }
            }
        };

        let scores: Vec<(String, f32)> = keys
            .iter()
            .map(|key| (key.clone(), self.aggregator.peek(key, f32::NEG_INFINITY)))
            .collect();
        let results: HashMap<String, f32> = scores.iter().cloned().collect();

        let promoted = self.manager.should_promote(&results);
        if promoted {
            // Consume the passed stage's series so a late stale episode
            // can never count toward the next stage.
            for key in &keys {
                self.aggregator.delete(key);
            }
            self.manager.promote();
            self.broadcaster.broadcast(self.manager.current_task());
        }

        CycleResult {
            cycle: self.cycle,
            curriculum_task: self.manager.current_task(),
            promoted,
            complete: self.manager.is_complete(),
            scores,
        }
    }
}
