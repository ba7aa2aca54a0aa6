use std::collections::HashMap;

use super::Hashable;

/// Sparse table of state-action value estimates
///
/// Any pair that was never written reads as exactly `0.0`; reading does not insert it.
///
/// The table has no capacity bound and no removal, so it grows with every distinct
/// state-action pair the agent learns from. Long-running agents in large state spaces
/// should account for this.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable<S, A>
where
    S: Hashable,
    A: Hashable,
{
    values: HashMap<(S, A), f32>,
}

impl<S, A> ValueTable<S, A>
where
    S: Hashable,
    A: Hashable,
{
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// The stored value for `(state, action)`, or `0.0` if it was never written
    pub fn get(&self, state: S, action: A) -> f32 {
        self.values.get(&(state, action)).copied().unwrap_or(0.0)
    }

    /// Store or overwrite the value for `(state, action)`
    pub fn set(&mut self, state: S, action: A, value: f32) {
        self.values.insert((state, action), value);
    }

    /// Whether a value was ever written for `(state, action)`
    pub fn contains(&self, state: S, action: A) -> bool {
        self.values.contains_key(&(state, action))
    }

    /// Number of written state-action pairs
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over written entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&(S, A), &f32)> {
        self.values.iter()
    }

    /// Consume the table, returning the underlying map of written entries
    pub fn into_inner(self) -> HashMap<(S, A), f32> {
        self.values
    }
}

impl<S, A> Default for ValueTable<S, A>
where
    S: Hashable,
    A: Hashable,
{
    fn default() -> Self {
        Self::new()
    }
}
