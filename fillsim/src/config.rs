use crate::helpe::*;

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            capacities:         DEFAULT_CAPACITIES.to_vec(),
            amplifications:     None,
            dead_spaces:        None,
            k:                  DEFAULT_K,
            m:                  DEFAULT_M,
            f:                  Some(DEFAULT_F),
            model:              CostModel::default(),
            step_increment:     DEFAULT_STEP,
            snapshot_interval:  DEFAULT_INTERVAL,
        }
    }
}

impl SimConfig {
    /// Quick config: given capacities, everything else at defaults.
    pub fn with_capacities(capacities: Vec<Amount>) -> Self {
        Self {
            capacities,
            ..Default::default()
        }
    }

    /// Quick config for the floored logarithmic model.
    pub fn floored_log(capacities: Vec<Amount>, k: f64, m: f64, f: f64) -> Self {
        Self {
            capacities,
            k,
            m,
            f:      Some(f),
            model:  CostModel::FlooredLog,
            ..Default::default()
        }
    }

    /// Builds the configured cost model, checking its constants.
    pub fn cost_function(&self) -> Result<Box<dyn CostFunction>, ConfigError> {
        self.model.build(self.k, self.m, self.f)
    }

    /// Turns the configuration into a set of untouched [Store]s.
    /// A successfully returned set is guaranteed to satisfy the
    /// simulator's assumptions. These are:
    /// - there is at least one store
    /// - all capacities are finite and positive
    /// - all amplifications are finite and positive
    /// - all dead spaces are finite and non-negative
    /// - per-store lists are as long as the capacity list
    /// - the step increment is finite and positive, the snapshot
    ///   interval at least 1
    /// - the cost model's constants are usable (see [`CostModel::build`])
    ///
    /// This function is the gatekeeper to the rest of the library.
    pub fn validate(&self) -> Result<Vec<Store>, ConfigError> {
        let n = self.capacities.len();
        if n == 0 {
            return Err(ConfigError::NoStores);
        }
        let amps = expand(&self.amplifications, n, 1.0, "amplifications")?;
        let deads = expand(&self.dead_spaces, n, 0.0, "dead spaces")?;

        if !(self.step_increment.is_finite() && self.step_increment > 0.0) {
            return Err(ConfigError::BadStep(self.step_increment));
        }
        if self.snapshot_interval == 0 {
            return Err(ConfigError::BadInterval);
        }
        self.cost_function()?;

        let mut res = Vec::with_capacity(n);
        for (index, ((&c, &a), &d)) in self.capacities
            .iter()
            .zip(amps.iter())
            .zip(deads.iter())
            .enumerate() {
            if !(c.is_finite() && c > 0.0) {
                return Err(ConfigError::BadCapacity { index, value: c });
            } else if !(a.is_finite() && a > 0.0) {
                return Err(ConfigError::BadAmplification { index, value: a });
            } else if !(d.is_finite() && d >= 0.0) {
                return Err(ConfigError::BadDeadSpace { index, value: d });
            }
            res.push(Store::new(c, a, d));
        }

        Ok(res)
    }
}

/// Fills in a per-store list, or checks that the given one matches
/// the number of stores.
#[inline(always)]
fn expand(
    given:      &Option<Vec<Amount>>,
    n:          usize,
    default:    Amount,
    what:       &'static str,
) -> Result<Vec<Amount>, ConfigError> {
    match given {
        Some(v) if v.len() != n => Err(ConfigError::LengthMismatch {
            what,
            expected:   n,
            got:        v.len(),
        }),
        Some(v) => Ok(v.clone()),
        None    => Ok(vec![default; n]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let stores = SimConfig::default().validate().unwrap();
        assert_eq!(stores.len(), 3);
        assert!(stores.iter().all(|s| s.amplification == 1.0 && s.dead_space == 0.0 && s.written == 0.0));
        assert_eq!(stores[2].capacity, 800.0);
    }

    #[test]
    fn per_store_lists_are_applied() {
        let cfg = SimConfig {
            amplifications: Some(vec![1.0, 2.0, 1.5]),
            dead_spaces:    Some(vec![0.0, 50.0, 0.0]),
            ..Default::default()
        };
        let stores = cfg.validate().unwrap();
        assert_eq!(stores[1].amplification, 2.0);
        assert_eq!(stores[1].dead_space, 50.0);
        assert_eq!(stores[2].amplification, 1.5);
    }

    #[test]
    fn rejects_bad_stores() {
        let cfg = SimConfig::with_capacities(vec![500.0, 0.0]);
        assert_eq!(cfg.validate(), Err(ConfigError::BadCapacity { index: 1, value: 0.0 }));

        let cfg = SimConfig::with_capacities(vec![]);
        assert_eq!(cfg.validate(), Err(ConfigError::NoStores));

        let cfg = SimConfig {
            amplifications: Some(vec![1.0, -1.0, 1.0]),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::BadAmplification { index: 1, .. })));

        let cfg = SimConfig {
            dead_spaces: Some(vec![0.0, 0.0, -3.0]),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::BadDeadSpace { index: 2, .. })));
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let cfg = SimConfig {
            amplifications: Some(vec![1.0, 1.0]),
            ..Default::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::LengthMismatch { what: "amplifications", expected: 3, got: 2 })
        );
        let cfg = SimConfig {
            dead_spaces: Some(vec![0.0; 4]),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::LengthMismatch { got: 4, .. })));
    }

    #[test]
    fn rejects_bad_run_settings() {
        let cfg = SimConfig { step_increment: 0.0, ..Default::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::BadStep(0.0)));
        let cfg = SimConfig { snapshot_interval: 0, ..Default::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::BadInterval));
        let cfg = SimConfig { f: None, model: CostModel::FlooredLog, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::MissingFloor { .. })));
    }
}
