use rand::{seq::SliceRandom, Rng};

use crate::{
    agent::Agent,
    assert_interval,
    decay::{Decay, LinearAnneal},
    exploration::{Choice, EpsilonGreedy},
    transition::Transition,
};

use super::{value_table::ValueTable, Hashable};

/// Configuration for the [`SarsaAgent`]
#[derive(Debug, Clone)]
pub struct SarsaAgentConfig<D: Decay> {
    /// Exploration probability used until the first call to
    /// [`schedule_hyperparameters`](Agent::schedule_hyperparameters)
    ///
    /// **Default**: `0.9`
    pub epsilon: f32,
    /// Schedule for epsilon, evaluated on the fraction of the step budget already spent
    ///
    /// **Default**: [`LinearAnneal`] from `1.0` to `0.05` over the first 7% of training
    pub epsilon_decay: D,
    /// The learning rate
    ///
    /// **Default**: `0.1`
    pub alpha: f32,
    /// The discount factor
    ///
    /// **Default**: `0.99`
    pub gamma: f32,
}

impl Default for SarsaAgentConfig<LinearAnneal> {
    fn default() -> Self {
        Self {
            epsilon: 0.9,
            epsilon_decay: LinearAnneal::default(),
            alpha: 0.1,
            gamma: 0.99,
        }
    }
}

/// An on-policy TD(0) agent that learns a table of state-action values
///
/// Each transition moves the value of the visited pair towards
/// r + γQ(s',a'), where a' is the action the policy actually chose in s'. The bootstrap
/// term is dropped when the transition ends the episode.
///
/// ### Generics
/// - `S` - The state type, used as a table key
/// - `D` - The [`Decay`] strategy scheduling epsilon
#[derive(Debug, Clone)]
pub struct SarsaAgent<S, D = LinearAnneal>
where
    S: Hashable,
    D: Decay,
{
    table: ValueTable<S, usize>,
    exploration: EpsilonGreedy<D>,
    num_actions: usize,
    alpha: f32, // learning rate
    gamma: f32, // discount factor
}

impl<S, D> SarsaAgent<S, D>
where
    S: Hashable,
    D: Decay,
{
    /// Initialize a new `SarsaAgent` choosing among `num_actions` actions
    ///
    /// **Panics** if `num_actions` is zero, if `epsilon` or `gamma` is not in the interval
    /// `[0,1]`, or if `alpha` is not greater than zero
    pub fn new(num_actions: usize, config: SarsaAgentConfig<D>) -> Self {
        assert!(num_actions > 0, "An agent needs at least one action.");
        assert_interval!(config.gamma, 0.0, 1.0);
        assert!(
            config.alpha > 0.0,
            "Invalid value for `alpha`. Must be greater than zero."
        );
        Self {
            table: ValueTable::new(),
            exploration: EpsilonGreedy::new(config.epsilon, config.epsilon_decay),
            num_actions,
            alpha: config.alpha,
            gamma: config.gamma,
        }
    }

    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    pub fn table(&self) -> &ValueTable<S, usize> {
        &self.table
    }

    /// Mutable access to the table, e.g. to seed prior estimates
    pub fn table_mut(&mut self) -> &mut ValueTable<S, usize> {
        &mut self.table
    }

    pub fn into_table(self) -> ValueTable<S, usize> {
        self.table
    }

    /// Choose uniformly among the highest-valued actions for `state`
    ///
    /// Ties are broken at random so that equally valued actions are not biased towards
    /// the lowest index.
    pub fn greedy_action<R: Rng + ?Sized>(&self, state: S, rng: &mut R) -> usize {
        let values = (0..self.num_actions)
            .map(|a| self.table.get(state, a))
            .collect::<Vec<_>>();
        let max_val = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let ties = values
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == max_val)
            .map(|(a, _)| a)
            .collect::<Vec<_>>();

        // Only empty if every value is NaN
        ties.choose(rng)
            .copied()
            .unwrap_or_else(|| rng.gen_range(0..self.num_actions))
    }
}

impl<S, D> Agent for SarsaAgent<S, D>
where
    S: Hashable,
    D: Decay,
{
    type State = S;
    type Action = usize;

    fn epsilon(&self) -> f32 {
        self.exploration.epsilon()
    }

    fn act_with_epsilon<R: Rng + ?Sized>(&self, state: &S, epsilon: f32, rng: &mut R) -> usize {
        match Choice::epsilon_greedy(epsilon, rng) {
            Choice::Explore => rng.gen_range(0..self.num_actions),
            Choice::Exploit => self.greedy_action(*state, rng),
        }
    }

    fn schedule_hyperparameters(&mut self, timestep: usize, max_timestep: usize) {
        let progress = if max_timestep == 0 {
            1.0
        } else {
            timestep as f32 / max_timestep as f32
        };
        self.exploration.schedule(progress);
    }

    fn learn(&mut self, transition: Transition<S, usize>) -> f32 {
        let Transition {
            state,
            action,
            reward,
            next_state,
            next_action,
            terminal,
        } = transition;

        let current = self.table.get(state, action);
        let target = if terminal {
            reward
        } else {
            reward + self.gamma * self.table.get(next_state, next_action)
        };
        let updated = current + self.alpha * (target - current);

        self.table.set(state, action, updated);
        updated
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use statrs::distribution::{ChiSquared, ContinuousCDF};

    use crate::decay;

    use super::*;

    fn agent(num_actions: usize, epsilon: f32) -> SarsaAgent<u32, decay::Constant> {
        SarsaAgent::new(
            num_actions,
            SarsaAgentConfig {
                epsilon,
                epsilon_decay: decay::Constant::new(epsilon),
                alpha: 0.5,
                gamma: 0.9,
            },
        )
    }

    fn transition(terminal: bool) -> Transition<u32, usize> {
        Transition {
            state: 0,
            action: 1,
            reward: 10.0,
            next_state: 2,
            next_action: 0,
            terminal,
        }
    }

    #[test]
    fn explores_uniformly_at_full_epsilon() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut agent = agent(4, 1.0);
        // A strong preference that exploration must ignore
        agent.table_mut().set(0, 3, 100.0);

        let n = 40_000;
        let mut counts = [0usize; 4];
        for _ in 0..n {
            counts[agent.act(&0, &mut rng)] += 1;
        }

        let expected = n as f64 / 4.0;
        let chi2 = counts
            .iter()
            .map(|&c| (c as f64 - expected).powi(2) / expected)
            .sum::<f64>();
        let critical = ChiSquared::new(3.0).unwrap().inverse_cdf(0.999);
        assert!(chi2 < critical, "Counts {counts:?} are not uniform");
        for c in counts {
            assert!((c as f64 / n as f64 - 0.25).abs() < 0.02);
        }
    }

    #[test]
    fn greedy_with_unique_maximum_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut agent = agent(5, 0.0);
        agent.table_mut().set(7, 0, -1.0);
        agent.table_mut().set(7, 3, 0.5);
        agent.table_mut().set(7, 4, 0.25);

        for _ in 0..1000 {
            assert_eq!(agent.act(&7, &mut rng), 3);
        }
    }

    #[test]
    fn greedy_ties_are_broken_at_random() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut agent = agent(4, 0.0);
        agent.table_mut().set(1, 0, 2.0);
        agent.table_mut().set(1, 2, 2.0);
        agent.table_mut().set(1, 3, -5.0);

        let mut counts = [0usize; 4];
        for _ in 0..2000 {
            counts[agent.act(&1, &mut rng)] += 1;
        }
        assert_eq!(counts[1], 0, "Action 1 is not in the tie set");
        assert_eq!(counts[3], 0, "Action 3 is not in the tie set");
        assert!(counts[0] > 0 && counts[2] > 0, "Both tied actions are chosen");
    }

    #[test]
    fn unseen_state_ties_every_action() {
        let mut rng = StdRng::seed_from_u64(3);
        let agent = agent(3, 0.0);
        let mut counts = [0usize; 3];
        for _ in 0..600 {
            counts[agent.act(&99, &mut rng)] += 1;
        }
        assert!(counts.iter().all(|&c| c > 0), "Counts {counts:?}");
        assert!(agent.table().is_empty(), "Acting does not write the table");
    }

    #[test]
    fn act_with_epsilon_overrides_without_mutating() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut agent = agent(2, 1.0);
        agent.table_mut().set(0, 1, 1.0);
        for _ in 0..500 {
            assert_eq!(agent.act_with_epsilon(&0, 0.0, &mut rng), 1);
        }
        assert_eq!(agent.epsilon(), 1.0);
    }

    #[test]
    fn learn_concrete_update() {
        let mut agent = agent(2, 0.0);
        let updated = agent.learn(transition(false));
        assert_eq!(updated, 5.0);
        assert_eq!(agent.table().get(0, 1), 5.0);
    }

    #[test]
    fn learn_bootstraps_from_the_chosen_next_action() {
        let mut agent = agent(2, 0.0);
        agent.table_mut().set(2, 0, 4.0);
        // Higher value for the action not taken must not be used
        agent.table_mut().set(2, 1, 100.0);
        let updated = agent.learn(transition(false));
        assert!((updated - 0.5 * (10.0 + 0.9 * 4.0)).abs() < 1e-5);
    }

    #[test]
    fn learn_terminal_ignores_bootstrap() {
        let mut agent = agent(2, 0.0);
        agent.table_mut().set(0, 1, 2.0);
        agent.table_mut().set(2, 0, 1.0e6);
        let updated = agent.learn(transition(true));
        assert_eq!(updated, 2.0 + 0.5 * (10.0 - 2.0));
    }

    #[test]
    fn learn_is_a_moving_average() {
        let mut agent = agent(2, 0.0);
        let first = agent.learn(transition(true));
        let second = agent.learn(transition(true));
        assert_eq!(first, 5.0);
        assert_eq!(second, 7.5);
        assert_ne!(first, second, "Repeating an update is not idempotent");
    }

    #[test]
    fn default_schedule() {
        let mut agent = SarsaAgent::<u32>::new(4, SarsaAgentConfig::default());
        assert_eq!(agent.epsilon(), 0.9);

        agent.schedule_hyperparameters(0, 1000);
        assert_eq!(agent.epsilon(), 1.0);

        agent.schedule_hyperparameters(35, 1000);
        assert!((agent.epsilon() - 0.525).abs() < 1e-6);

        agent.schedule_hyperparameters(70, 1000);
        assert!((agent.epsilon() - 0.05).abs() < 1e-6);

        agent.schedule_hyperparameters(1000, 1000);
        assert!((agent.epsilon() - 0.05).abs() < 1e-6);

        assert_eq!((agent.alpha(), agent.gamma()), (0.1, 0.99));
    }

    #[test]
    #[should_panic(expected = "at least one action")]
    fn rejects_empty_action_space() {
        agent(0, 0.1);
    }

    #[test]
    #[should_panic(expected = "alpha")]
    fn rejects_non_positive_alpha() {
        SarsaAgent::<u32>::new(
            2,
            SarsaAgentConfig {
                alpha: 0.0,
                ..Default::default()
            },
        );
    }
}
