use strum::{EnumCount, FromRepr};

use crate::env::{DiscreteActionSpace, Environment, Step};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Square {
    Frozen,
    Hole,
    Start,
    Goal,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumCount, FromRepr)]
#[repr(usize)]
pub enum FLAction {
    Left = 0,
    Down = 1,
    Right = 2,
    Up = 3,
}

const SIZE: usize = 4;

/// A very simple RL environment taken from Python [gymnasium](https://gymnasium.farama.org/)
///
/// Deterministic 4x4 lake: the state is the cell index, moving into the edge leaves the
/// agent in place, falling into a hole ends the episode with no reward and reaching the
/// goal ends it with a reward of `1.0`.
pub struct FrozenLake {
    map: [Square; SIZE * SIZE],
    pos: usize,
}

impl FrozenLake {
    pub fn new() -> Self {
        use Square::*;
        // TODO: Support custom maps
        let map = [
            Start, Frozen, Frozen, Frozen, //
            Frozen, Hole, Frozen, Hole, //
            Frozen, Frozen, Frozen, Hole, //
            Hole, Frozen, Frozen, Goal,
        ];
        Self { map, pos: 0 }
    }

    pub fn square(&self, state: usize) -> Square {
        self.map[state]
    }
}

impl Default for FrozenLake {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for FrozenLake {
    type State = usize;
    type Action = usize;

    fn step(&mut self, action: Self::Action) -> Step<Self::State> {
        let action = FLAction::from_repr(action)
            .unwrap_or_else(|| panic!("Invalid action: {}", action));
        let (row, col) = (self.pos / SIZE, self.pos % SIZE);

        self.pos = match action {
            FLAction::Left => row * SIZE + col.saturating_sub(1),
            FLAction::Down => (row + 1).min(SIZE - 1) * SIZE + col,
            FLAction::Right => row * SIZE + (col + 1).min(SIZE - 1),
            FLAction::Up => row.saturating_sub(1) * SIZE + col,
        };

        let (reward, terminated) = match self.map[self.pos] {
            Square::Goal => (1.0, true),
            Square::Hole => (0.0, true),
            Square::Frozen | Square::Start => (0.0, false),
        };

        Step {
            next_state: self.pos,
            reward,
            terminated,
            truncated: false,
        }
    }

    fn reset(&mut self) -> Self::State {
        self.pos = 0;
        self.pos
    }
}

impl DiscreteActionSpace for FrozenLake {
    fn num_actions(&self) -> usize {
        FLAction::COUNT
    }
}
