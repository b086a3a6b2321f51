//! Command-line plumbing shared by the binaries.

use crate::helpe::*;

/// Simulation parameters, as given on the command line.
#[derive(clap::Args, Debug, Clone)]
pub struct SimArgs {
    /// Store capacities, separated by underscores (e.g., 500_600_800)
    #[arg(short, long, default_value = "500_600_800")]
    pub stores:     String,

    /// Per-store amplification factors, separated by underscores (default: all 1)
    #[arg(short, long)]
    pub amps:       Option<String>,

    /// Per-store dead space, separated by underscores (default: all 0)
    #[arg(short, long)]
    pub deads:      Option<String>,

    /// Base cost constant
    #[arg(short, default_value_t = DEFAULT_K)]
    #[arg(value_parser = clap::value_parser!(f64))]
    pub k:          f64,

    /// Cost scale constant
    #[arg(short, default_value_t = DEFAULT_M)]
    #[arg(value_parser = clap::value_parser!(f64))]
    pub m:          f64,

    /// Floor constant (remaining space below which the floored model penalizes)
    #[arg(short, default_value_t = DEFAULT_F)]
    #[arg(value_parser = clap::value_parser!(f64))]
    pub f:          f64,

    /// Cost model
    #[arg(long, value_enum, default_value_t = CostModel::Tanh)]
    pub model:      CostModel,

    /// Raw amount written per step
    #[arg(long, default_value_t = DEFAULT_STEP)]
    #[arg(value_parser = clap::value_parser!(f64))]
    pub step:       f64,

    /// Take a snapshot every this many steps
    #[arg(long, default_value_t = DEFAULT_INTERVAL)]
    #[arg(value_parser = clap::value_parser!(usize))]
    pub interval:   usize,
}

impl SimArgs {
    /// Parses the list-valued arguments and assembles a [`SimConfig`].
    /// The result still has to be validated.
    pub fn to_config(&self) -> Result<SimConfig, ConfigError> {
        let amplifications = self.amps
            .as_deref()
            .map(parse_list)
            .transpose()?;
        let dead_spaces = self.deads
            .as_deref()
            .map(parse_list)
            .transpose()?;

        Ok(SimConfig {
            capacities:         parse_list(&self.stores)?,
            amplifications,
            dead_spaces,
            k:                  self.k,
            m:                  self.m,
            f:                  Some(self.f),
            model:              self.model,
            step_increment:     self.step,
            snapshot_interval:  self.interval,
        })
    }
}

/// Sets up terminal logging on stderr. `verbose` counts `-v` flags.
pub fn init_logging(verbose: u8) -> Result<(), log::SetLoggerError> {
    let llv = match verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Error)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);

    simplelog::TermLogger::init(
        llv,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
}
