use rand::Rng;

use crate::{agent::Agent, env::Environment, util::mean_std};

/// Summary of the returns collected during one evaluation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Cumulative training steps completed when the evaluation ran
    pub steps: usize,
    /// Mean of the per-episode returns
    pub mean: f32,
    /// Population standard deviation of the per-episode returns
    pub std: f32,
}

/// Run `eval_episodes` episodes with the agent's current policy and no learning
///
/// Each episode stops at `max_steps` steps or as soon as the environment reports the
/// episode done. Actions are chosen with `epsilon` if given, otherwise with whatever
/// epsilon the agent currently holds, so exploration noise from training carries over
/// unless the caller asks for `Some(0.0)`. The agent is only borrowed immutably and is
/// never changed.
///
/// **Returns** `(mean, std)` of the per-episode returns
pub fn evaluate<E, A, R>(
    env: &mut E,
    agent: &A,
    max_steps: usize,
    eval_episodes: usize,
    epsilon: Option<f32>,
    rng: &mut R,
) -> (f32, f32)
where
    E: Environment,
    A: Agent<State = E::State, Action = E::Action>,
    R: Rng + ?Sized,
{
    let epsilon = epsilon.unwrap_or_else(|| agent.epsilon());

    let returns = (0..eval_episodes)
        .map(|_| {
            let mut state = env.reset();
            let mut episodic_return = 0.0;
            let mut steps = 0;
            let mut done = false;

            while !done && steps < max_steps {
                let action = agent.act_with_epsilon(&state, epsilon, rng);
                let step = env.step(action);
                done = step.is_done();
                episodic_return += step.reward;
                steps += 1;
                state = step.next_state;
            }

            episodic_return
        })
        .collect::<Vec<_>>();

    mean_std(&returns)
}
