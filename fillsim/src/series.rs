//! Turns a run's [`Snapshot`]s into per-store time series, the shape in
//! which results get charted or exported.

use crate::helpe::*;

/// One point per snapshot: (step, value).
pub type Series = Vec<(usize, f64)>;

/// Store label → series, in store order.
pub type SeriesMap = IndexMap<String, Series>;

/// The four series produced by a run. All share the same x axis (the
/// snapshot steps), but [`available`](SeriesSet::available) and
/// [`score`](SeriesSet::score) are sparse: a saturated store has no
/// points there.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSet {
    pub steps:      Vec<usize>,
    pub size:       SeriesMap,
    pub available:  SeriesMap,
    pub percent:    SeriesMap,
    pub score:      SeriesMap,
}

/// Chart labels for `stores`. Stores sharing a capacity would share a
/// label, so repeats get their index appended.
pub fn labels(stores: &[Store]) -> Vec<String> {
    let mut seen: IndexMap<String, usize> = IndexMap::new();
    stores.iter()
        .enumerate()
        .map(|(idx, s)| {
            let base = s.label();
            let count = seen.entry(base.clone()).or_insert(0);
            *count += 1;
            if *count == 1 { base } else { format!("{base}#{idx}") }
        })
        .collect()
}

impl SeriesSet {
    pub fn from_snapshots(stores: &[Store], snapshots: &[Snapshot]) -> Self {
        let names = labels(stores);
        let empty = || -> SeriesMap {
            names.iter()
                .map(|n| (n.clone(), vec![]))
                .collect()
        };
        let mut res = Self {
            steps:      snapshots.iter().map(|s| s.step).collect(),
            size:       empty(),
            available:  empty(),
            percent:    empty(),
            score:      empty(),
        };

        for snap in snapshots {
            debug_assert!(snap.observations.len() == names.len(), "Snapshot/store mismatch");
            for (name, obs) in names.iter().zip(snap.observations.iter()) {
                let x = snap.step;
                res.size[name].push((x, obs.written));
                res.percent[name].push((x, obs.fill_ratio));
                if let Some(a) = obs.available {
                    res.available[name].push((x, a));
                }
                if let Some(s) = obs.score {
                    res.score[name].push((x, s));
                }
            }
        }

        res
    }

    pub fn from_outcome(outcome: &RunOutcome) -> Self {
        Self::from_snapshots(&outcome.stores, &outcome.snapshots)
    }

    /// The four series with their chart titles, in display order.
    pub fn titled(&self) -> [(&'static str, &SeriesMap); 4] {
        [
            ("Size",        &self.size),
            ("Available",   &self.available),
            ("Percent",     &self.percent),
            ("Score",       &self.score),
        ]
    }
}

/// Dumps snapshots as CSV, one row per store per snapshot. Missing
/// values (available space or score of a saturated store) are left
/// empty.
pub fn to_csv(stores: &[Store], snapshots: &[Snapshot]) -> String {
    let names = labels(stores);
    let mut res = String::from("step,store,written,available,fill_ratio,score\n");
    let opt = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
    for snap in snapshots {
        for (name, obs) in names.iter().zip(snap.observations.iter()) {
            // Writing into a `String` cannot fail.
            let _ = writeln!(
                res,
                "{},{},{},{},{},{}",
                snap.step,
                name,
                obs.written,
                opt(obs.available),
                obs.fill_ratio,
                opt(obs.score),
            );
        }
    }

    res
}
