//! Cost models. A cost model judges how expensive it is to hand the
//! next increment to a [`Store`], given how much has been written to it
//! and how much room it has left. The engine feeds whichever store
//! scores lowest.
//!
//! The tool went through several shapes of cost function over time.
//! Each one is kept as its own [`CostFunction`] implementation, and
//! [`CostModel`] names them for configuration purposes.

pub mod logarithmic;
pub mod tanh;

use crate::helpe::*;

pub use self::{
    logarithmic::{FlooredLog, PlainLog},
    tanh::Tanh,
};

/// Defines the interface of cost models.
///
/// Implementations must be pure: the same inputs always give the
/// same score. They are only ever called with `available > 0`; the
/// engine filters out saturated stores before asking.
pub trait CostFunction: Send + Sync {
    /// Marginal cost of writing to a store with `written` raw units
    /// already in it, nominal `capacity`, and `available` room left.
    fn score(&self, written: Amount, capacity: Amount, available: Amount) -> f64;
    fn name(&self) -> &'static str;
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum CostModel {
    /// (C - A) / M + K / tanh(A * F / M)
    #[default]
    Tanh,
    /// R * (K + M * (ln C - ln A) / (C - A))
    Log,
    /// Logarithmic cost plus a penalty regime once A drops below F
    FlooredLog,
}

impl CostModel {
    pub fn name(&self) -> &'static str {
        match self {
            CostModel::Tanh         => "tanh",
            CostModel::Log          => "log",
            CostModel::FlooredLog   => "floored-log",
        }
    }

    /// Returns `true` if the model cannot do without the F constant.
    pub fn needs_floor(&self) -> bool {
        match self {
            CostModel::Tanh | CostModel::FlooredLog => true,
            CostModel::Log                          => false,
        }
    }

    /// Checks the constants against the model's needs and builds the
    /// corresponding [`CostFunction`].
    pub fn build(
        &self,
        k:  f64,
        m:  f64,
        f:  Option<f64>,
    ) -> Result<Box<dyn CostFunction>, ConfigError> {
        check_finite("K", k)?;
        check_finite("M", m)?;
        if let Some(v) = f {
            check_finite("F", v)?;
        }
        let f = match (f, self.needs_floor()) {
            (Some(v), _)    => v,
            (None, true)    => { return Err(ConfigError::MissingFloor { model: self.name() }); },
            // Unused.
            (None, false)   => 0.0,
        };

        let res: Box<dyn CostFunction> = match self {
            CostModel::Tanh         => {
                if m == 0.0 {
                    return Err(ConfigError::BadConstant {
                        name:   "M",
                        value:  m,
                        reason: "the tanh model divides by it",
                    });
                }
                if f <= 0.0 {
                    return Err(ConfigError::BadConstant {
                        name:   "F",
                        value:  f,
                        reason: "the tanh model needs it positive",
                    });
                }
                Box::new(Tanh { k, m, f })
            },
            CostModel::Log          => Box::new(PlainLog { k, m }),
            CostModel::FlooredLog   => {
                // Below 1, the denominator of the logarithmic branch
                // reaches zero within the first few writes.
                if f < 1.0 {
                    return Err(ConfigError::FloorTooLow { model: self.name(), value: f });
                }
                Box::new(FlooredLog { k, m, f })
            },
        };

        Ok(res)
    }
}

#[inline(always)]
fn check_finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::BadConstant { name, value, reason: "not a finite number" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_every_model_with_defaults() {
        for model in CostModel::value_variants() {
            let cf = model.build(DEFAULT_K, DEFAULT_M, Some(DEFAULT_F)).unwrap();
            assert_eq!(cf.name(), model.name());
        }
    }

    #[test]
    fn plain_log_does_not_need_floor() {
        assert!(CostModel::Log.build(1.0, 256.0, None).is_ok());
        assert_eq!(
            CostModel::FlooredLog.build(1.0, 256.0, None).err(),
            Some(ConfigError::MissingFloor { model: "floored-log" })
        );
        assert!(CostModel::Tanh.build(1.0, 256.0, None).is_err());
    }

    #[test]
    fn rejects_unusable_constants() {
        assert!(CostModel::Log.build(f64::NAN, 256.0, None).is_err());
        assert!(CostModel::Tanh.build(1.0, 0.0, Some(4.0)).is_err());
        for f in [0.0, -2.0] {
            assert!(matches!(
                CostModel::Tanh.build(1.0, 256.0, Some(f)),
                Err(ConfigError::BadConstant { name: "F", .. })
            ));
        }
        assert!(matches!(
            CostModel::FlooredLog.build(1.0, 256.0, Some(0.5)),
            Err(ConfigError::FloorTooLow { .. })
        ));
    }
}
