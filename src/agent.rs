use rand::Rng;

use crate::transition::Transition;

/// An agent acting with an epsilon-greedy policy and learning from one transition at a time
///
/// Action selection borrows the agent immutably, so a policy can be evaluated through a
/// shared reference without any risk of changing its table or hyperparameters.
pub trait Agent {
    type State;
    type Action;

    /// Current exploration probability
    fn epsilon(&self) -> f32;

    /// Choose an action for `state`, exploring with probability `epsilon` instead of
    /// the agent's own value
    fn act_with_epsilon<R: Rng + ?Sized>(
        &self,
        state: &Self::State,
        epsilon: f32,
        rng: &mut R,
    ) -> Self::Action;

    /// Choose an action for `state` with the agent's current exploration probability
    fn act<R: Rng + ?Sized>(&self, state: &Self::State, rng: &mut R) -> Self::Action {
        self.act_with_epsilon(state, self.epsilon(), rng)
    }

    /// Update the hyperparameters given the current timestep and the total step budget
    fn schedule_hyperparameters(&mut self, timestep: usize, max_timestep: usize);

    /// Learn from a transition
    ///
    /// **Returns** the updated value of the transition's state-action pair
    fn learn(&mut self, transition: Transition<Self::State, Self::Action>) -> f32;
}
