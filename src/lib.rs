/// Agent interface shared by the training and evaluation loops
pub mod agent;

/// Implemented RL algorithms
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Environment
pub mod env;

/// Error types
pub mod error;

/// Evaluation of an agent's current policy
pub mod eval;

/// Exploration policies
pub mod exploration;

/// Training loop
pub mod train;

/// Single-step transitions
pub mod transition;

/// Testing environments
#[cfg(feature = "gym")]
pub mod gym;

mod util;

pub use agent::Agent;
pub use algo::tabular::{
    sarsa::{SarsaAgent, SarsaAgentConfig},
    value_table::ValueTable,
};
pub use error::{Error, Result};
pub use eval::{evaluate, Evaluation};
pub use train::{Trainer, TrainerConfig, Training};
pub use transition::Transition;
