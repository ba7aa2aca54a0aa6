use crate::error::{check_interval, Error, Result};

/// An implementation of a time-decaying value
///
/// Strategies are evaluated on training progress `t`, the fraction of the step budget
/// already spent, so `t` runs from `0.0` at the start of training to `1.0` at the end.
pub trait Decay {
    /// Calculate value at progress `t`
    fn evaluate(&self, t: f32) -> f32;
}

fn validate(rate: f32, vi: f32, vf: f32) -> Result<()> {
    ((rate >= 0.0 && vi > vf) || (rate < 0.0 && vi < vf))
        .then_some(())
        .ok_or(Error::InvalidDecay("`vi - vf` must have same sign as `rate`"))
}

/// A constant value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constant {
    value: f32,
}

impl Constant {
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl Decay for Constant {
    fn evaluate(&self, _t: f32) -> f32 {
        self.value
    }
}

/// v(t) = v<sub>f</sub> + (v<sub>i</sub> - v<sub>f</sub>) * e<sup>-rt</sup>
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Exponential {
    rate: f32,
    vi: f32,
    vf: f32,
}

impl Exponential {
    pub fn new(rate: f32, vi: f32, vf: f32) -> Result<Self> {
        validate(rate, vi, vf)?;
        Ok(Self { rate, vi, vf })
    }
}

impl Decay for Exponential {
    fn evaluate(&self, t: f32) -> f32 {
        let &Self { rate, vi, vf } = self;
        vf + (vi - vf) * (-rate * t).exp()
    }
}

/// v(t) = v<sub>i</sub> - min(1, t / f) * (v<sub>i</sub> - v<sub>f</sub>)
///
/// Moves linearly from v<sub>i</sub> to v<sub>f</sub> over the first fraction `f` of training
/// and holds v<sub>f</sub> afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearAnneal {
    fraction: f32,
    vi: f32,
    vf: f32,
}

impl LinearAnneal {
    /// **Errors** if `fraction` is not in `(0, 1]` or if `vi` or `vf` is not in `[0, 1]`
    pub fn new(fraction: f32, vi: f32, vf: f32) -> Result<Self> {
        check_interval("vi", vi, 0.0, 1.0)?;
        check_interval("vf", vf, 0.0, 1.0)?;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(Error::InvalidDecay("`fraction` must be in the interval (0, 1]"));
        }
        Ok(Self { fraction, vi, vf })
    }
}

impl Default for LinearAnneal {
    /// Anneal from `1.0` to `0.05` over the first 7% of training
    fn default() -> Self {
        Self {
            fraction: 0.07,
            vi: 1.0,
            vf: 0.05,
        }
    }
}

impl Decay for LinearAnneal {
    fn evaluate(&self, t: f32) -> f32 {
        let &Self { fraction, vi, vf } = self;
        vi - (t / fraction).min(1.0) * (vi - vf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_functional() {
        assert!(validate(1.0, 1.0, 0.0).is_ok());
        assert!(validate(1.0, -1.0, 0.0).is_err());
        assert!(validate(-1.0, 1.0, 0.0).is_err());
        assert!(validate(-1.0, -1.0, 0.0).is_ok());
    }

    #[test]
    fn constant_decay() {
        let x = Constant::new(1.0);
        assert_eq!(x.evaluate(0.0), 1.0);
        assert_eq!(x.evaluate(1.0), 1.0);
    }

    #[test]
    fn exponential_decay() {
        let x = Exponential::new(2.0, 2.0, 0.5).unwrap();
        assert_eq!(x.evaluate(0.0), 2.0);
        assert_eq!(x.evaluate(1.0), 0.5 + 1.5 * f32::exp(-2.0));
        assert!(Exponential::new(2.0, 0.5, 2.0).is_err());
    }

    #[test]
    fn linear_anneal_decay() {
        let x = LinearAnneal::default();
        assert_eq!(x.evaluate(0.0), 1.0);
        assert!((x.evaluate(0.035) - 0.525).abs() < 1e-6);
        assert!((x.evaluate(0.07) - 0.05).abs() < 1e-6);
        assert!((x.evaluate(1.0) - 0.05).abs() < 1e-6);
    }

    #[test]
    fn linear_anneal_rejects_bad_fraction() {
        assert!(LinearAnneal::new(0.0, 1.0, 0.05).is_err());
        assert!(LinearAnneal::new(1.5, 1.0, 0.05).is_err());
        assert!(LinearAnneal::new(0.5, 1.0, 0.05).is_ok());
    }

    #[test]
    fn linear_anneal_rejects_values_outside_unit_interval() {
        assert_eq!(
            LinearAnneal::new(0.5, 1.5, 0.0),
            Err(Error::OutOfInterval {
                name: "vi",
                value: 1.5,
                min: 0.0,
                max: 1.0
            })
        );
        assert!(LinearAnneal::new(0.5, 1.0, -0.1).is_err());
    }
}
