use thiserror::Error;

/// Errors raised while validating hyperparameters and decay strategies
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A value fell outside its permitted closed interval
    #[error("invalid value {value} for `{name}`: must be in the interval [{min}, {max}]")]
    OutOfInterval {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// A value that must be strictly positive was zero or negative
    #[error("invalid value {value} for `{name}`: must be greater than zero")]
    NotPositive { name: &'static str, value: f64 },

    /// The parameters of a decay strategy are inconsistent
    #[error("invalid decay strategy: {0}")]
    InvalidDecay(&'static str),
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Check that `value` lies in `[min, max]`
pub(crate) fn check_interval(name: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    (value >= min && value <= max)
        .then_some(())
        .ok_or(Error::OutOfInterval {
            name,
            value,
            min,
            max,
        })
}

/// Check that `value` is strictly positive
pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<()> {
    (value > 0.0)
        .then_some(())
        .ok_or(Error::NotPositive { name, value })
}
