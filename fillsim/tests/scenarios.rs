//! End-to-end runs of the simulator over small, well-understood setups.

use fillsim::*;
use fillsim::{series::SeriesSet, trials::run_trials};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const EPS: f64 = 1e-9;

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

fn floored(capacities: Vec<Amount>) -> SimConfig {
    SimConfig::floored_log(capacities, 1.0, 256.0, 20.0)
}

/// Upper bound on steps: every step hands out one increment, and a
/// store takes at most one increment past its room.
fn step_bound(config: &SimConfig) -> usize {
    config.validate()
        .unwrap()
        .iter()
        .map(|s| ((s.capacity - s.dead_space) / (s.amplification * config.step_increment)).ceil() as usize + 1)
        .sum()
}

#[test]
fn single_store_fills_to_capacity() {
    let cfg = floored(vec![500.0]);
    let out = simulate(&cfg, &mut rng(1)).unwrap();
    assert!(out.exhausted);
    let w = out.stores[0].written;
    assert!(out.stores[0].available() <= 0.0);
    assert!(w >= 500.0 && w <= 500.1 + EPS, "written = {w}");
    assert!(out.steps <= step_bound(&cfg));
    assert_eq!(out.saturated_at, vec![Some(out.steps)]);
}

#[test]
fn identical_stores_track_each_other() {
    let cfg = floored(vec![500.0, 500.0]);
    for seed in [1, 2, 3] {
        let out = simulate(&cfg, &mut rng(seed)).unwrap();
        assert!(!out.snapshots.is_empty());
        for snap in &out.snapshots {
            let (a, b) = (snap.observations[0].written, snap.observations[1].written);
            assert!((a - b).abs() <= cfg.step_increment + EPS, "step {}: {a} vs {b}", snap.step);
        }
        assert!(out.stores.iter().all(|s| s.available() <= 0.0));
    }
}

#[test]
fn smaller_store_saturates_first_then_larger_gets_everything() {
    let cfg = floored(vec![500.0, 1000.0]);
    let mut sim = Simulation::from_config(&cfg).unwrap();
    let mut tb = rng(5);
    let mut small_done = false;
    while let Some(step) = sim.step(&mut tb) {
        if small_done {
            assert_eq!(step.candidates, vec![1]);
            assert_eq!(step.chosen, 1);
        }
        small_done = !sim.stores()[0].is_eligible();
    }
    let out = sim.finish();
    let (small, large) = (out.saturated_at[0].unwrap(), out.saturated_at[1].unwrap());
    assert!(small < large);
    assert_eq!(large, out.steps);
}

#[test]
fn every_choice_is_a_minimum_and_written_never_drops() {
    let cfg = SimConfig {
        amplifications: Some(vec![1.0, 2.0, 1.5]),
        dead_spaces:    Some(vec![0.0, 20.0, 5.0]),
        ..SimConfig::with_capacities(vec![60.0, 100.0, 80.0])
    };
    for model in CostModel::value_variants() {
        let cfg = SimConfig { model: *model, ..cfg.clone() };
        let mut sim = Simulation::from_config(&cfg).unwrap();
        let mut tb = rng(11);
        let mut prev: Vec<Amount> = sim.stores().iter().map(|s| s.written).collect();
        loop {
            let before = sim.scores();
            let Some(step) = sim.step(&mut tb) else { break };
            let min = before.iter()
                .flatten()
                .copied()
                .fold(f64::INFINITY, f64::min);
            assert_eq!(before[step.chosen], Some(min), "{} model", model.name());
            assert_eq!(step.eligible, before.iter().flatten().count());

            let now: Vec<Amount> = sim.stores().iter().map(|s| s.written).collect();
            assert!(now.iter().zip(prev.iter()).all(|(n, p)| n >= p));
            prev = now;
        }
        assert!(sim.steps() <= step_bound(&cfg));
        assert!(sim.stores().iter().all(|s| s.available() <= 0.0));
    }
}

#[test]
fn zero_and_negative_zero_scores_tie() {
    // An untouched store scores 0.0; the other one, with dead space
    // and a negative K, scores 0 * -1 = -0.0.
    let cfg = SimConfig {
        dead_spaces: Some(vec![0.0, 10.0]),
        ..SimConfig::floored_log(vec![100.0, 100.0], -1.0, 0.0, 1.0)
    };
    let mut sim = Simulation::from_config(&cfg).unwrap();
    let scores = sim.scores();
    assert_eq!(scores, vec![Some(0.0), Some(0.0)]);
    assert!(scores[1].unwrap().is_sign_negative());
    let step = sim.step(&mut rng(2)).unwrap();
    assert_eq!(step.candidates, vec![0, 1]);
}

#[test]
fn amplified_store_takes_fewer_raw_writes() {
    let cfg = SimConfig {
        amplifications: Some(vec![1.0, 2.0]),
        dead_spaces:    Some(vec![0.0, 20.0]),
        ..floored(vec![100.0, 100.0])
    };
    let out = simulate(&cfg, &mut rng(3)).unwrap();
    let (plain, amped) = (&out.stores[0], &out.stores[1]);
    assert!(plain.written >= 100.0 && plain.written <= 100.1 + EPS);
    assert!(amped.written >= 40.0 && amped.written <= 40.1 + EPS);
    assert!(amped.fill_ratio() >= 1.0);
}

#[test]
fn seeded_runs_are_reproducible() {
    let cfg = SimConfig::default();
    let a = simulate(&cfg, &mut rng(42)).unwrap();
    let b = simulate(&cfg, &mut rng(42)).unwrap();
    assert_eq!(a.snapshots, b.snapshots);
    assert_eq!(a.steps, b.steps);
}

#[test]
fn series_are_aligned_and_sparse() {
    let cfg = floored(vec![50.0, 200.0]);
    let out = simulate(&cfg, &mut rng(9)).unwrap();
    let set = SeriesSet::from_outcome(&out);
    assert_eq!(set.steps.len(), out.snapshots.len());
    assert_eq!(set.size["s50"].len(), set.steps.len());
    assert_eq!(set.percent["s200"].len(), set.steps.len());
    // The small store saturates well before the last snapshot.
    assert!(set.available["s50"].len() < set.steps.len());
    assert_eq!(set.available["s50"].len(), set.score["s50"].len());
    assert!(set.available["s50"].iter().all(|&(_, a)| a > 0.0));
}

#[test]
fn invalid_configs_never_run() {
    let bad = [
        SimConfig::with_capacities(vec![]),
        SimConfig::with_capacities(vec![500.0, -1.0]),
        SimConfig { dead_spaces: Some(vec![0.0]), ..SimConfig::default() },
        SimConfig { amplifications: Some(vec![1.0, 0.0, 1.0]), ..SimConfig::default() },
    ];
    for cfg in &bad {
        assert!(simulate(cfg, &mut rng(0)).is_err());
        assert!(run_trials(cfg, &[0, 1]).is_err());
    }
}

#[test]
fn parallel_trials_match_sequential_runs() {
    let cfg = SimConfig::with_capacities(vec![30.0, 30.0, 45.0]);
    let trials = run_trials(&cfg, &[4, 5]).unwrap();
    for t in &trials {
        let out = simulate(&cfg, &mut rand::rngs::StdRng::seed_from_u64(t.seed)).unwrap();
        assert_eq!(t.steps, out.steps);
        assert_eq!(t.saturated_at, out.saturated_at);
    }
}
