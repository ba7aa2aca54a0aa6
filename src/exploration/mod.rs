use rand::Rng;

/// Exploration policy result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Explore,
    Exploit,
}

impl Choice {
    /// Draw `r` uniformly from `[0, 1)` and explore if `r < epsilon`
    ///
    /// An epsilon of `0.0` always exploits and an epsilon of `1.0` always explores.
    pub fn epsilon_greedy<R: Rng + ?Sized>(epsilon: f32, rng: &mut R) -> Self {
        if rng.gen::<f32>() < epsilon {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }
}

mod epsilon_greedy;

pub use epsilon_greedy::EpsilonGreedy;
