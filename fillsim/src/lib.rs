//! Welcome to `fillsim`!
//!
//! A discrete-time, greedy allocation simulator. A set of finite
//! [`Store`]s receives write traffic in fixed increments; at every step
//! the store whose marginal cost (as judged by some [`cost::CostFunction`])
//! is the lowest gets the next increment. The run ends when no store has
//! any room left, and what remains is a sequence of [`Snapshot`]s
//! describing how the stores filled up over time.

mod store;
mod config;

pub mod cost;
pub mod engine;
pub mod series;
pub mod render;
pub mod trials;
pub mod cli;
pub mod helpe;

pub use crate::helpe::*;

/// Our fundamental unit of interest. A [`Store`] is a destination of
/// finite [`capacity`](Store::capacity) which absorbs writes until it
/// runs out of room.
///
/// Only [`written`](Store::written) changes during a run. Every raw unit
/// written consumes [`amplification`](Store::amplification) units of
/// space, on top of [`dead_space`](Store::dead_space) which was already
/// gone before the run started.
///
/// > ***ATTENTION:*** a store is *eligible* for writes as long as its
/// > available space is **strictly** positive. A store sitting at exactly
/// > zero available space is saturated, and the cost model is never
/// > consulted for it again.
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    pub capacity:       Amount,
    pub amplification:  Amount,
    pub dead_space:     Amount,
    // Cumulative raw amount allocated so far. Starts at zero and
    // only ever grows.
    pub written:        Amount,
}

/// Everything needed to set up one simulation run.
///
/// This replaces any notion of process-wide defaults: each run builds
/// (or clones) its own [`SimConfig`], so concurrent runs never see each
/// other's settings. [`SimConfig::default`] reproduces the historical
/// defaults of the tool.
///
/// A [`SimConfig`] is *unchecked*. It becomes a set of [`Store`]s only by
/// passing through [`SimConfig::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub capacities:         Vec<Amount>,
    /// Per-store amplification factors. `None` means all ones.
    pub amplifications:     Option<Vec<Amount>>,
    /// Per-store dead space. `None` means all zeros.
    pub dead_spaces:        Option<Vec<Amount>>,
    pub k:                  f64,
    pub m:                  f64,
    /// Only the floored-log model strictly needs it.
    pub f:                  Option<f64>,
    pub model:              cost::CostModel,
    pub step_increment:     Amount,
    pub snapshot_interval:  usize,
}
