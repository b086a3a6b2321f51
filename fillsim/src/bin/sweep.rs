use fillsim::*;
use fillsim::{cli::{SimArgs, init_logging}, trials::{run_trials, summarize}};

/// Repeats a simulation under many seeds and reports how much the
/// outcome depends on tie-breaking
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    sim:        SimArgs,

    /// Number of trials
    #[arg(short, long, default_value_t = 16)]
    #[arg(value_parser = clap::value_parser!(u64))]
    trials:     u64,

    /// Seed of the first trial; trial `i` uses `first_seed + i`
    #[arg(long, default_value_t = 0)]
    #[arg(value_parser = clap::value_parser!(u64))]
    first_seed: u64,

    /// Verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose:    u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Args::parse();
    init_logging(cli.verbose)?;
    anyhow::ensure!(cli.trials > 0, "At least one trial is needed");

    let config = cli.sim.to_config()?;
    let stores = config.validate()?;
    let seeds: Vec<u64> = (0..cli.trials)
        .map(|i| cli.first_seed.wrapping_add(i))
        .collect();
    let trials = run_trials(&config, &seeds)?;

    let (min_steps, max_steps) = trials.iter()
        .map(|t| t.steps)
        .minmax()
        .into_option()
        .unwrap_or((0, 0));
    println!(
        "Model:\t\t{}\nTrials:\t\t{}\nSteps:\t\t{min_steps}..={max_steps}\n",
        config.model.name(),
        trials.len()
    );
    println!("Store\t\tSaturated at (min/max/mean)\t\tWritten (min/max)");
    for s in summarize(&stores, &trials) {
        let sat = match s.saturation {
            Some((lo, hi, mean))    => format!("{lo}/{hi}/{mean:.1}"),
            None                    => "-".to_string(),
        };
        println!(
            "{}\t\t{sat}\t\t\t{:.1}/{:.1}",
            s.label,
            s.written.0,
            s.written.1
        );
    }

    Ok(())
}
