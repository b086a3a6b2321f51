//! The allocation engine: a greedy, myopic loop which always feeds the
//! currently cheapest store.
//!
//! One step goes as follows:
//!
//! 1. Every store with positive available space is scored by the
//!    [`CostFunction`].
//! 2. All stores sharing the minimum score (exact equality) form the
//!    candidate set.
//! 3. If there are no candidates, the run is over. This is the *only*
//!    way a run ends on its own.
//! 4. A [`TieBreaker`] picks one candidate uniformly, and that store
//!    gets `step_increment` more raw units.
//! 5. If the step's index is a multiple of the snapshot interval
//!    (step 0 included), a [`Snapshot`] of the post-increment state is
//!    recorded.

use rand::Rng;

use crate::helpe::*;

/// Source of randomness for tie-breaking. Returns an index in `0..n`,
/// uniformly. `n` is never zero.
///
/// Any [`rand::Rng`] is a [`TieBreaker`], so runs are reproducible by
/// handing a seeded generator to the engine.
pub trait TieBreaker {
    fn pick(&mut self, n: usize) -> usize;
}

impl<R: Rng + ?Sized> TieBreaker for R {
    #[inline(always)]
    fn pick(&mut self, n: usize) -> usize {
        // Rust ranges (x..y) are low-inclusive, upper-exclusive.
        self.gen_range(0..n)
    }
}

/// What happened during one step.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Zero-based step index.
    pub index:      usize,
    /// Indices of all eligible stores sharing the minimum score,
    /// in store order.
    pub candidates: Vec<usize>,
    /// The store that received the increment. Always a member of
    /// `candidates`.
    pub chosen:     usize,
    pub min_score:  f64,
    /// How many stores were eligible.
    pub eligible:   usize,
}

/// Everything a finished (or stopped) run leaves behind.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Final state of the stores, in input order.
    pub stores:         Vec<Store>,
    pub snapshots:      Vec<Snapshot>,
    /// Total number of steps executed.
    pub steps:          usize,
    /// `true` if the run ended because no store had room left,
    /// `false` if it was stopped from outside.
    pub exhausted:      bool,
    /// For each store, the number of steps that had been completed
    /// when it stopped being eligible. `Some(0)` for stores that were
    /// full from the start.
    pub saturated_at:   Vec<Option<usize>>,
    /// Name of the cost model used.
    pub model:          &'static str,
}

/// A single simulation run. It owns its stores: runs never share
/// state, so any number of them may proceed side by side.
pub struct Simulation {
    stores:             Vec<Store>,
    cost:               Box<dyn CostFunction>,
    step_increment:     Amount,
    snapshot_interval:  usize,
    // Number of steps executed so far, which is also the
    // index of the next step.
    steps:              usize,
    snapshots:          Vec<Snapshot>,
    saturated_at:       Vec<Option<usize>>,
    exhausted:          bool,
}

impl Simulation {
    /// Sets up a run over already validated stores.
    pub fn new(
        stores:             Vec<Store>,
        cost:               Box<dyn CostFunction>,
        step_increment:     Amount,
        snapshot_interval:  usize,
    ) -> Self {
        debug_assert!(step_increment > 0.0, "Bad step increment");
        debug_assert!(snapshot_interval > 0, "Bad snapshot interval");
        let saturated_at = stores.iter()
            .map(|s| if s.is_eligible() { None } else { Some(0) })
            .collect();

        Self {
            stores,
            cost,
            step_increment,
            snapshot_interval,
            steps:          0,
            snapshots:      vec![],
            saturated_at,
            exhausted:      false,
        }
    }

    /// Validates `config` and sets up a run from it.
    pub fn from_config(config: &SimConfig) -> Result<Self, ConfigError> {
        let stores = config.validate()?;
        let cost = config.cost_function()?;

        Ok(Self::new(stores, cost, config.step_increment, config.snapshot_interval))
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns `true` once a step has found no eligible store.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Current score of each store, `None` for ineligible ones.
    pub fn scores(&self) -> Vec<Option<f64>> {
        self.stores
            .iter()
            .map(|s| self.score_of(s))
            .collect()
    }

    #[inline(always)]
    fn score_of(&self, s: &Store) -> Option<f64> {
        let available = s.available();
        if available > 0.0 {
            Some(self.cost.score(s.written, s.capacity, available))
        } else { None }
    }

    /// Runs one step. Returns `None`, and changes nothing, if no store
    /// has room left.
    pub fn step<T>(&mut self, tb: &mut T) -> Option<Step>
    where T: TieBreaker + ?Sized {
        if self.exhausted {
            return None;
        }
        let scored: Vec<(usize, f64)> = self.scores()
            .into_iter()
            .enumerate()
            .filter_map(|(idx, s)| s.map(|v| (idx, v)))
            .collect();
        if scored.is_empty() {
            self.exhausted = true;
            return None;
        }

        // Plain float comparison: -0.0 ties with 0.0 and NaN never wins.
        // If every score is NaN, all eligible stores are candidates.
        let min_score = scored.iter()
            .map(|&(_, v)| v)
            .filter(|v| !v.is_nan())
            .reduce(|min, v| if v < min { v } else { min });
        let candidates: Vec<usize> = match min_score {
            Some(min)   => scored.iter()
                .filter(|&&(_, v)| v == min)
                .map(|&(idx, _)| idx)
                .collect(),
            None        => scored.iter().map(|&(idx, _)| idx).collect(),
        };
        let min_score = min_score.unwrap_or(f64::NAN);

        let chosen = candidates[tb.pick(candidates.len())];
        let index = self.steps;
        self.stores[chosen].advance(self.step_increment);
        self.steps += 1;
        if !self.stores[chosen].is_eligible() {
            debug!("{} saturated after {} steps", self.stores[chosen].label(), self.steps);
            self.saturated_at[chosen] = Some(self.steps);
        }

        if index % self.snapshot_interval == 0 {
            self.take_snapshot(index);
        }

        Some(Step {
            index,
            candidates,
            chosen,
            min_score,
            eligible: scored.len(),
        })
    }

    fn take_snapshot(&mut self, step: usize) {
        let observations = self.stores
            .iter()
            .map(|s| s.observe(self.score_of(s)))
            .collect();
        trace!("snapshot at step {step}");
        self.snapshots.push(Snapshot { step, observations });
    }

    /// Steps until no store has room left. There is no step ceiling;
    /// see [`Simulation::run_bounded`] for that.
    pub fn run<T>(mut self, tb: &mut T) -> RunOutcome
    where T: TieBreaker + ?Sized {
        let start = Instant::now();
        while self.step(tb).is_some() {}
        info!(
            "{} model: all {} stores saturated after {} steps ({} μs)",
            self.cost.name(),
            self.stores.len(),
            self.steps,
            start.elapsed().as_micros()
        );

        self.finish()
    }

    /// Like [`Simulation::run`], but gives up once `max_steps` steps
    /// have been executed in total. The outcome tells whether the run
    /// got to the end.
    pub fn run_bounded<T>(mut self, tb: &mut T, max_steps: usize) -> RunOutcome
    where T: TieBreaker + ?Sized {
        while self.steps < max_steps {
            if self.step(tb).is_none() { break; }
        }
        // The ceiling may coincide with the natural end of the run.
        if !self.exhausted && !self.stores.iter().any(|s| s.is_eligible()) {
            self.exhausted = true;
        }
        if !self.exhausted {
            warn!("stopped after {} steps with stores still eligible", self.steps);
        }

        self.finish()
    }

    /// Consumes the run, handing over its results as they are.
    pub fn finish(self) -> RunOutcome {
        RunOutcome {
            model:          self.cost.name(),
            stores:         self.stores,
            snapshots:      self.snapshots,
            steps:          self.steps,
            exhausted:      self.exhausted,
            saturated_at:   self.saturated_at,
        }
    }
}

/// Validates `config` and runs it to completion.
pub fn simulate<T>(config: &SimConfig, tb: &mut T) -> Result<RunOutcome, ConfigError>
where T: TieBreaker + ?Sized {
    let sim = Simulation::from_config(config)?;

    Ok(sim.run(tb))
}
