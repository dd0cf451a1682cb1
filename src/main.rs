//! Depot simulator entry point: CLI wiring and report output.

mod cli;

use std::process;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use depot_sim::config::ScenarioConfig;
use depot_sim::io::export::{export_daily_csv, export_hourly_csv, export_trucks_csv};
use depot_sim::logging;
use depot_sim::sim::runner::{RunResult, SimulationRunner};
use depot_sim::tables::build_daily_table;

use cli::Args;

/// `--scenario` takes priority, then `--preset`, then the baseline.
fn load_scenario(args: &Args) -> anyhow::Result<ScenarioConfig> {
    let mut scenario = if let Some(path) = &args.scenario {
        ScenarioConfig::from_toml_file(path)?
    } else if let Some(name) = &args.preset {
        ScenarioConfig::from_preset(name)?
    } else {
        ScenarioConfig::baseline()
    };
    if let Some(seed) = args.seed {
        scenario.simulation.seed = seed;
    }
    if let Some(days) = args.days {
        scenario.simulation.days = days;
    }
    Ok(scenario)
}

fn export(args: &Args, result: &RunResult) -> anyhow::Result<()> {
    if let Some(path) = &args.hourly_out {
        export_hourly_csv(&result.hours, path)
            .with_context(|| format!("failed to write hourly CSV to {}", path.display()))?;
        info!(path = %path.display(), "hourly results written");
    }
    if let Some(path) = &args.daily_out {
        export_daily_csv(&result.daily, path)
            .with_context(|| format!("failed to write daily CSV to {}", path.display()))?;
        info!(path = %path.display(), "daily results written");
    }
    if let Some(path) = &args.trucks_out {
        export_trucks_csv(&result.trucks, path)
            .with_context(|| format!("failed to write trucks CSV to {}", path.display()))?;
        info!(path = %path.display(), "truck population written");
    }
    Ok(())
}

#[cfg(feature = "api")]
fn serve(scenario: ScenarioConfig, result: RunResult, port: u16) -> anyhow::Result<()> {
    use std::net::SocketAddr;
    use std::sync::Arc;

    let state = Arc::new(depot_sim::api::AppState { scenario, result });
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
    rt.block_on(depot_sim::api::serve(state, addr))
        .with_context(|| format!("API server on {addr} failed"))
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let args = Args::parse();

    let scenario = load_scenario(&args)?;
    let runner = match SimulationRunner::new(scenario) {
        Ok(runner) => runner,
        Err(invalid) => {
            for e in &invalid.0 {
                eprintln!("{e}");
            }
            process::exit(1);
        }
    };

    let result = runner.run();

    println!("{}", build_daily_table(&result.daily));
    println!("\n{}", result.kpis);

    export(&args, &result)?;

    #[cfg(feature = "api")]
    if args.serve {
        serve(runner.scenario().clone(), result, args.port)?;
    }

    Ok(())
}
