use fillsim::*;
use fillsim::{cli::{SimArgs, init_logging}, render::write_report, series::{SeriesSet, to_csv}};
use rand::{rngs::StdRng, SeedableRng};

/// Simulates cost-driven write allocation over a set of stores
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    sim:        SimArgs,

    /// Seed for tie-breaking (random if absent)
    #[arg(long)]
    #[arg(value_parser = clap::value_parser!(u64))]
    seed:       Option<u64>,

    /// Give up after this many steps
    #[arg(long)]
    #[arg(value_parser = clap::value_parser!(usize))]
    max_steps:  Option<usize>,

    /// Directory to write the charts into
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    out:        Option<PathBuf>,

    /// File to dump snapshots into, as CSV
    #[arg(long, value_parser = clap::value_parser!(PathBuf))]
    csv:        Option<PathBuf>,

    /// Verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose:    u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Args::parse();
    init_logging(cli.verbose)?;

    let config = cli.sim.to_config()?;
    let sim = Simulation::from_config(&config)?;
    let mut rng = match cli.seed {
        Some(seed)  => StdRng::seed_from_u64(seed),
        None        => StdRng::from_entropy(),
    };
    let outcome = match cli.max_steps {
        Some(limit) => sim.run_bounded(&mut rng, limit),
        None        => sim.run(&mut rng),
    };

    println!(
        "Model:\t\t{}\nSteps:\t\t{}\nSnapshots:\t{}\nFinished:\t{}\n",
        outcome.model,
        outcome.steps,
        outcome.snapshots.len(),
        outcome.exhausted
    );
    println!("Store\t\tWritten\t\tFill\t\tSaturated at");
    for (label, (store, sat)) in series::labels(&outcome.stores)
        .iter()
        .zip(outcome.stores.iter().zip(outcome.saturated_at.iter())) {
        let sat = sat.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string());
        println!(
            "{label}\t\t{:.1}\t\t{:.2}%\t\t{sat}",
            store.written,
            store.fill_ratio() * 100.0
        );
    }

    if let Some(path) = cli.csv {
        std::fs::write(&path, to_csv(&outcome.stores, &outcome.snapshots))?;
        info!("wrote {}", path.display());
    }
    if let Some(dir) = cli.out {
        let heading = format!("{} model, stores {}", outcome.model, cli.sim.stores);
        write_report(&SeriesSet::from_outcome(&outcome), &heading, &dir)?;
    }

    Ok(())
}
