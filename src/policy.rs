//! Policy boundary.
//!
//! The curriculum engine consumes the trained policy through forward
//! inference only; training, gradients and parameter storage are
//! external. Workers hold a policy handle and ask it for one action per
//! step.

use crate::trace::Action;

/// Forward-inference handle to the trained policy.
pub trait Policy: Send {
    /// Choose an action for a single observation.
    fn act(&mut self, observation: &[f32]) -> Action;

    /// Choose actions for a batch of observations.
    ///
    /// The default loops over `act`; implementations backed by a
    /// batched model should override this.
    fn act_batch(&mut self, observations: &[Vec<f32>]) -> Vec<Action> {
        observations.iter().map(|obs| self.act(obs)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ConstantPolicy(u32);

    impl Policy for ConstantPolicy {
        fn act(&mut self, _observation: &[f32]) -> Action {
            Action::Discrete(self.0)
        }
    }

    #[test]
    fn test_act_batch_default() {
        let mut policy = ConstantPolicy(7);
        let actions = policy.act_batch(&[vec![0.0], vec![1.0], vec![2.0]]);
        assert_eq!(actions.len(), 3);
        assert!(actions.iter().all(|a| a.as_discrete() == 7));
    }
}
