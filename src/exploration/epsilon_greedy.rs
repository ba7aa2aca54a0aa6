use crate::{assert_interval, decay::Decay};

/// Epsilon greedy exploration policy with a scheduled epsilon threshold
#[derive(Debug, Clone)]
pub struct EpsilonGreedy<D: Decay> {
    epsilon: f32,
    decay: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a starting epsilon and a decay strategy
    ///
    /// The starting value holds until the first call to [`schedule`](Self::schedule).
    ///
    /// **Panics** if `epsilon` is not in the interval `[0,1]`
    pub fn new(epsilon: f32, decay: D) -> Self {
        assert_interval!(epsilon, 0.0, 1.0);
        Self { epsilon, decay }
    }

    /// Current exploration probability
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Move epsilon to the decay strategy's value at training progress `t`, clamped to `[0,1]`
    pub fn schedule(&mut self, t: f32) {
        self.epsilon = self.decay.evaluate(t).clamp(0.0, 1.0);
    }
}
