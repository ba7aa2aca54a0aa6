/// Represents an episodic Markov decision process in which an agent can operate.
///
/// Implementations are external collaborators of the training loop: they are reset at
/// the start of each episode and stepped once per action. A malfunctioning environment
/// should panic, which aborts the run; the loop performs no retry.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State;

    /// A representation of an action that an agent can take to affect the environment
    type Action;

    /// Update the environment in response to an action taken by an agent
    fn step(&mut self, action: Self::Action) -> Step<Self::State>;

    /// Reset the environment to an initial state
    ///
    /// **Returns** the state
    fn reset(&mut self) -> Self::State;
}

/// An environment with a finite action space `0..num_actions()`
pub trait DiscreteActionSpace: Environment<Action = usize> {
    /// Number of discrete actions available in every state
    fn num_actions(&self) -> usize;
}

/// The outcome of a single [`Environment::step`]
#[derive(Debug, Clone, PartialEq)]
pub struct Step<S> {
    /// The state of the environment after the action is taken
    pub next_state: S,
    /// The reward received for taking the action
    pub reward: f32,
    /// The task reached its natural end
    pub terminated: bool,
    /// The episode was cut short by a condition outside the task
    pub truncated: bool,
}

impl<S> Step<S> {
    /// Whether the episode ends after this step
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}
