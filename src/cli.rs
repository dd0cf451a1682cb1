//! Command-line arguments of the `depot-sim` binary.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

#[derive(Parser, Debug)]
#[command(name = "depot-sim", author, version, about = "Truck depot hourly energy dispatch simulator")]
#[command(group(ArgGroup::new("source").args(["scenario", "preset"])))]
#[command(
    long_about = "Simulates a truck depot hour by hour: solar feeds trucks first, then the \
    battery, the battery tops trucks up, and the grid covers the rest.\n\
    \nIf neither --scenario nor --preset is given, the baseline preset is used."
)]
pub struct Args {
    /// Load the scenario from a TOML file
    #[arg(long, value_name = "PATH")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset (baseline, small_depot, weak_grid)
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Override the random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the number of simulated days
    #[arg(long)]
    pub days: Option<usize>,

    /// Write one CSV row per simulated hour
    #[arg(long, value_name = "PATH")]
    pub hourly_out: Option<PathBuf>,

    /// Write one CSV row per simulated day
    #[arg(long, value_name = "PATH")]
    pub daily_out: Option<PathBuf>,

    /// Write the truck population with loaded energy
    #[arg(long, value_name = "PATH")]
    pub trucks_out: Option<PathBuf>,

    /// Start the REST API after the run
    #[cfg(feature = "api")]
    #[arg(long)]
    pub serve: bool,

    /// API server port
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    pub port: u16,
}
