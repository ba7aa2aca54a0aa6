use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    agent::Agent,
    algo::tabular::{
        sarsa::{SarsaAgent, SarsaAgentConfig},
        value_table::ValueTable,
        Hashable,
    },
    decay::LinearAnneal,
    env::{DiscreteActionSpace, Environment, Step},
    error::{check_interval, check_positive, Result},
    eval::{evaluate, Evaluation},
    transition::Transition,
};

/// Configuration for the [`Trainer`]
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerConfig {
    /// Step budget for the whole run
    ///
    /// **Default**: `1_000_000`
    pub total_steps: usize,
    /// Maximum number of steps in a training or evaluation episode
    ///
    /// **Default**: `100`
    pub episode_length: usize,
    /// Number of episodes per evaluation
    ///
    /// **Default**: `100`
    pub eval_episodes: usize,
    /// Evaluate each time the completed steps pass another multiple of this many steps
    ///
    /// **Default**: `100_000`
    pub eval_freq: usize,
    /// The discount factor
    ///
    /// **Default**: `0.99`
    pub gamma: f32,
    /// The learning rate
    ///
    /// **Default**: `0.1`
    pub alpha: f32,
    /// Exploration probability for the first action of the run
    ///
    /// **Default**: `0.9`
    pub epsilon: f32,
    /// Exploration probability used during evaluation, or `None` to evaluate with the
    /// epsilon the agent holds at that point of training
    ///
    /// **Default**: `None`
    pub eval_epsilon: Option<f32>,
    /// Seed for the random number generator, or `None` to seed from system entropy
    ///
    /// **Default**: `None`
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            total_steps: 1_000_000,
            episode_length: 100,
            eval_episodes: 100,
            eval_freq: 100_000,
            gamma: 0.99,
            alpha: 0.1,
            epsilon: 0.9,
            eval_epsilon: None,
            seed: None,
        }
    }
}

impl TrainerConfig {
    /// Check every hyperparameter against its permitted range
    pub fn validate(&self) -> Result<()> {
        check_positive("episode_length", self.episode_length as f64)?;
        check_positive("eval_episodes", self.eval_episodes as f64)?;
        check_positive("eval_freq", self.eval_freq as f64)?;
        check_interval("gamma", self.gamma, 0.0, 1.0)?;
        check_positive("alpha", self.alpha as f64)?;
        check_interval("epsilon", self.epsilon, 0.0, 1.0)?;
        if let Some(eval_epsilon) = self.eval_epsilon {
            check_interval("eval_epsilon", eval_epsilon, 0.0, 1.0)?;
        }
        Ok(())
    }
}

/// Results of a training run
#[derive(Debug, Clone)]
pub struct Training<S: Hashable> {
    /// One entry per evaluation, in the order they ran
    pub evaluations: Vec<Evaluation>,
    /// The agent's final value table
    pub table: ValueTable<S, usize>,
}

impl<S: Hashable> Training<S> {
    /// Mean return of each evaluation
    pub fn return_means(&self) -> Vec<f32> {
        self.evaluations.iter().map(|e| e.mean).collect()
    }
}

/// Drives episodes of act, step, learn until the step budget is spent, evaluating the
/// policy at regular intervals
pub struct Trainer {
    config: TrainerConfig,
    rng: StdRng,
}

impl Trainer {
    /// **Errors** if the configuration fails [`TrainerConfig::validate`]
    pub fn new(config: TrainerConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Train a fresh [`SarsaAgent`], evaluating it in the training environment
    pub fn run<E>(&mut self, env: &mut E) -> Training<E::State>
    where
        E: DiscreteActionSpace,
        E::State: Hashable,
    {
        let mut agent = self.sarsa_agent::<E::State>(env.num_actions());
        let evaluations = self.train_agent(&mut agent, env, None);
        Training {
            evaluations,
            table: agent.into_table(),
        }
    }

    /// Train a fresh [`SarsaAgent`] in `env`, evaluating it in `eval_env`
    pub fn run_with_eval_env<E>(&mut self, env: &mut E, eval_env: &mut E) -> Training<E::State>
    where
        E: DiscreteActionSpace,
        E::State: Hashable,
    {
        let mut agent = self.sarsa_agent::<E::State>(env.num_actions());
        let evaluations = self.train_agent(&mut agent, env, Some(eval_env));
        Training {
            evaluations,
            table: agent.into_table(),
        }
    }

    /// Run the training loop for any [`Agent`]
    ///
    /// Evaluations run in `eval_env` if given, otherwise in `env` between episodes.
    ///
    /// **Returns** the evaluations in the order they ran
    pub fn train_agent<E, A>(
        &mut self,
        agent: &mut A,
        env: &mut E,
        mut eval_env: Option<&mut E>,
    ) -> Vec<Evaluation>
    where
        E: Environment,
        E::State: Clone,
        E::Action: Clone,
        A: Agent<State = E::State, Action = E::Action>,
    {
        let TrainerConfig {
            total_steps,
            episode_length,
            eval_episodes,
            eval_freq,
            eval_epsilon,
            ..
        } = self.config;

        let mut completed_steps = 0;
        let mut episodes = 0usize;
        let mut evaluations = Vec::new();

        while completed_steps < total_steps {
            let mut state = env.reset();
            let mut action = agent.act(&state, &mut self.rng);
            let mut episodic_return = 0.0;
            let mut steps = 0;
            let mut done = false;

            while !done && steps < episode_length {
                let step = env.step(action.clone());
                done = step.is_done();
                steps += 1;

                let Step {
                    next_state, reward, ..
                } = step;
                episodic_return += reward;

                agent.schedule_hyperparameters(completed_steps, total_steps);
                let next_action = agent.act(&next_state, &mut self.rng);
                agent.learn(Transition {
                    state,
                    action,
                    reward,
                    next_state: next_state.clone(),
                    next_action: next_action.clone(),
                    terminal: done,
                });

                state = next_state;
                action = next_action;
            }

            completed_steps += steps;
            episodes += 1;
            debug!(
                "Episode {}: {} steps, return {}, epsilon {}",
                episodes,
                steps,
                episodic_return,
                agent.epsilon()
            );

            // Steps advance by whole episodes, so a threshold may be overshot
            if completed_steps > evaluations.len() * eval_freq {
                let target = match eval_env.as_deref_mut() {
                    Some(eval_env) => eval_env,
                    None => &mut *env,
                };
                let (mean, std) = evaluate(
                    target,
                    &*agent,
                    episode_length,
                    eval_episodes,
                    eval_epsilon,
                    &mut self.rng,
                );
                info!(
                    "Evaluation: {} steps - returns {} +/- {}",
                    completed_steps, mean, std
                );
                evaluations.push(Evaluation {
                    steps: completed_steps,
                    mean,
                    std,
                });
            }
        }

        evaluations
    }

    fn sarsa_agent<S: Hashable>(&self, num_actions: usize) -> SarsaAgent<S> {
        SarsaAgent::new(
            num_actions,
            SarsaAgentConfig {
                epsilon: self.config.epsilon,
                epsilon_decay: LinearAnneal::default(),
                alpha: self.config.alpha,
                gamma: self.config.gamma,
            },
        )
    }
}
