/// Represents a single on-policy transition in the environment
///
/// Produced once per step by the training loop and consumed immediately by
/// [`Agent::learn`](crate::Agent::learn).
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S, A> {
    /// The state of the environment before taking the action
    pub state: S,
    /// The action taken in the given state
    pub action: A,
    /// The reward received after taking the action
    pub reward: f32,
    /// The state of the environment after the action is taken
    pub next_state: S,
    /// The action the policy selected for `next_state`
    pub next_action: A,
    /// Whether the episode ended with this transition, either terminated or truncated
    pub terminal: bool,
}
