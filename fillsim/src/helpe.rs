pub use std::{
    path::{Path, PathBuf},
    fmt::Write as FmtWrite,
    time::Instant,
};
pub use thiserror::Error;
pub use itertools::Itertools;
pub use rayon::prelude::*;
pub use indexmap::IndexMap;
pub use clap::{Parser, ValueEnum};
pub use log::{debug, info, trace, warn};

pub use crate::{Store, SimConfig,
    cost::{CostFunction, CostModel},
    engine::{Simulation, TieBreaker, Step, RunOutcome, simulate},
};

/// The unit for measuring space. Capacities, dead space, amounts
/// written and available space are all expressed in it, and the
/// simulator does not care what it stands for (bytes, blocks, GiB...).
pub type Amount = f64;

/// Historical defaults of the tool. [`SimConfig::default`] is built
/// out of these.
pub const DEFAULT_CAPACITIES:   [Amount; 3] = [500.0, 600.0, 800.0];
pub const DEFAULT_K:            f64 = 0.1;
pub const DEFAULT_M:            f64 = 256.0;
pub const DEFAULT_F:            f64 = 4.0;
/// Raw amount handed to the winning store at every step.
pub const DEFAULT_STEP:         Amount = 0.1;
/// A [`Snapshot`] is taken every this many steps.
pub const DEFAULT_INTERVAL:     usize = 50;

/// Separator of list-valued parameters, e.g. `500_600_800`.
pub const LIST_SEPARATOR:       char = '_';

#[derive(Error, Debug, Clone, PartialEq)]
/// Appears while turning a [`SimConfig`] into a set of [`Store`]s.
/// Nothing is simulated unless the whole configuration is sound.
pub enum ConfigError {
    #[error("at least one store is needed")]
    NoStores,
    #[error("store {index} has invalid capacity {value} (must be finite and > 0)")]
    BadCapacity { index: usize, value: Amount },
    #[error("store {index} has invalid amplification {value} (must be finite and > 0)")]
    BadAmplification { index: usize, value: Amount },
    #[error("store {index} has invalid dead space {value} (must be finite and >= 0)")]
    BadDeadSpace { index: usize, value: Amount },
    #[error("{what} lists {got} values, but there are {expected} stores")]
    LengthMismatch { what: &'static str, expected: usize, got: usize },
    #[error("constant {name} = {value} is unusable: {reason}")]
    BadConstant { name: &'static str, value: f64, reason: &'static str },
    #[error("the {model} cost model needs the F constant")]
    MissingFloor { model: &'static str },
    #[error("F = {value} is below 1, which the {model} cost model cannot handle")]
    FloorTooLow { model: &'static str, value: f64 },
    #[error("step increment {0} must be finite and > 0")]
    BadStep(Amount),
    #[error("snapshot interval must be at least 1")]
    BadInterval,
    #[error("cannot parse {item:?} (in {input:?}) as a number")]
    Parse { input: String, item: String },
}

/// What a single [`Store`] looked like when a [`Snapshot`] was taken.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub written:    Amount,
    /// Only present while the store still has room.
    pub available:  Option<Amount>,
    pub fill_ratio: f64,
    /// Only present while the store is eligible: the cost model is
    /// undefined for stores without available space.
    pub score:      Option<f64>,
}

/// An immutable record of all stores at a given simulation step.
/// Observations are in store order.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub step:           usize,
    pub observations:   Vec<Observation>,
}

/// Parses a list of numbers separated by [`LIST_SEPARATOR`], the format
/// in which list-valued parameters are passed around (`500_600_800`).
///
/// Surrounding whitespace is ignored. An empty item is an error.
pub fn parse_list(input: &str) -> Result<Vec<f64>, ConfigError> {
    input.trim()
        .split(LIST_SEPARATOR)
        .map(|item| {
            item.trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::Parse {
                    input:  input.to_string(),
                    item:   item.to_string(),
                })
        })
        .collect()
}
