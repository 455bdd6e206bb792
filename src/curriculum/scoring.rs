//! Canonical scoring functions.
//!
//! Both are binary outcomes expressed through the general real-valued
//! scoring contract, so thresholded means over many episodes read as
//! success rates. `touch_rate` shows the multi-episode form of the
//! same contract.

use crate::sim::state::GameState;
use crate::trace::EpisodeTrace;

/// 1.0 if any car touched the ball during the episode.
pub fn ball_touched(state: &GameState, _trace: &EpisodeTrace, _prev: &[EpisodeTrace]) -> f32 {
    if state.any_ball_touch() {
        1.0
    } else {
        0.0
    }
}

/// 1.0 if the goal condition was reached during the episode.
pub fn goal_scored(state: &GameState, _trace: &EpisodeTrace, _prev: &[EpisodeTrace]) -> f32 {
    if state.goal_scored {
        1.0
    } else {
        0.0
    }
}

/// Fraction of the trailing window (this episode plus the prior-trace
/// window) whose episodes ended on a terminal flag rather than a
/// truncation.
pub fn touch_rate(_state: &GameState, trace: &EpisodeTrace, prev: &[EpisodeTrace]) -> f32 {
    let succeeded = |t: &EpisodeTrace| t.last().map(|step| step.terminal).unwrap_or(false);
    let successes = prev.iter().filter(|t| succeeded(t)).count() + succeeded(trace) as usize;
    successes as f32 / (prev.len() + 1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Car, Team};
    use crate::trace::{Action, Transition};

    fn touched_state() -> GameState {
        let mut state = GameState::new();
        let mut car = Car::default_spawn(Team::Blue);
        car.ball_touches = 3;
        state.cars.insert("blue-0".to_string(), car);
        state
    }

    fn ended_trace(terminal: bool) -> EpisodeTrace {
        let mut trace = EpisodeTrace::new("s", 0);
        trace.push(Transition {
            observation: vec![],
            action: Action::Discrete(0),
            reward: 0.0,
            terminal,
            truncated: !terminal,
        });
        trace
    }

    #[test]
    fn test_ball_touched_binary() {
        let trace = EpisodeTrace::new("s", 0);
        assert_eq!(ball_touched(&GameState::new(), &trace, &[]), 0.0);
        assert_eq!(ball_touched(&touched_state(), &trace, &[]), 1.0);
    }

    #[test]
    fn test_goal_scored_binary() {
        let trace = EpisodeTrace::new("s", 0);
        let mut state = GameState::new();
        assert_eq!(goal_scored(&state, &trace, &[]), 0.0);
        state.goal_scored = true;
        assert_eq!(goal_scored(&state, &trace, &[]), 1.0);
    }

    #[test]
    fn test_touch_rate_over_window() {
        let state = GameState::new();
        let prev = vec![ended_trace(true), ended_trace(false), ended_trace(true)];
        let rate = touch_rate(&state, &ended_trace(true), &prev);
        assert!((rate - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_touch_rate_empty_window() {
        let state = GameState::new();
        assert_eq!(touch_rate(&state, &ended_trace(false), &[]), 0.0);
        assert_eq!(touch_rate(&state, &ended_trace(true), &[]), 1.0);
    }
}
