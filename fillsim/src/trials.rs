//! Repeated runs of the same configuration under different seeds.
//!
//! When several stores tie, which one gets fed is a coin flip, so two
//! runs of one configuration can diverge. Trials quantify how much.
//! Every trial owns its stores and its random source, which lets them
//! run in parallel without sharing anything.

use rand::{rngs::StdRng, SeedableRng};

use crate::helpe::*;

/// The gist of one finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSummary {
    pub seed:           u64,
    pub steps:          usize,
    pub saturated_at:   Vec<Option<usize>>,
    pub final_written:  Vec<Amount>,
}

impl TrialSummary {
    pub fn from_outcome(seed: u64, outcome: &RunOutcome) -> Self {
        Self {
            seed,
            steps:          outcome.steps,
            saturated_at:   outcome.saturated_at.clone(),
            final_written:  outcome.stores.iter().map(|s| s.written).collect(),
        }
    }
}

/// How one store fared across trials.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreStats {
    pub label:              String,
    /// (min, max, mean) of the step count at which the store saturated,
    /// `None` if it saturated in no trial.
    pub saturation:         Option<(usize, usize, f64)>,
    /// (min, max) of the final amount written.
    pub written:            (Amount, Amount),
}

/// Runs `config` once per seed, in parallel, each run to completion.
/// Results are in seed order.
pub fn run_trials(config: &SimConfig, seeds: &[u64]) -> Result<Vec<TrialSummary>, ConfigError> {
    // Reject bad input once, before spawning any work.
    config.validate()?;
    let start = Instant::now();

    let res = seeds.par_iter()
        .map(|&seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = simulate(config, &mut rng)?;

            Ok(TrialSummary::from_outcome(seed, &outcome))
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;

    info!(
        "{} trials done in {} ms",
        res.len(),
        start.elapsed().as_millis()
    );

    Ok(res)
}

/// Per-store statistics over `trials`, in store order. Stores that
/// never saturated in some trial only count the trials where they did.
/// Returns an empty vector if there are no trials.
pub fn summarize(stores: &[Store], trials: &[TrialSummary]) -> Vec<StoreStats> {
    if trials.is_empty() {
        return vec![];
    }
    crate::series::labels(stores)
        .into_iter()
        .enumerate()
        .map(|(idx, label)| {
            let sat: Vec<usize> = trials.iter()
                .filter_map(|t| t.saturated_at[idx])
                .collect();
            let saturation = sat.iter()
                .minmax()
                .into_option()
                .map(|(&lo, &hi)| (lo, hi, sat.iter().sum::<usize>() as f64 / sat.len() as f64));
            let written = trials.iter()
                .map(|t| t.final_written[idx])
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), w| (lo.min(w), hi.max(w)));

            StoreStats { label, saturation, written }
        })
        .collect()
}
