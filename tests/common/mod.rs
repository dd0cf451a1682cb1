//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use depot_sim::config::ScenarioConfig;
use depot_sim::devices::{Truck, TruckClass};
use depot_sim::sim::runner::{RunResult, SimulationRunner};
use depot_sim::sim::types::SimConfig;

/// Tolerance for accumulated f32 energy sums.
pub const EPS_KWH: f32 = 1e-2;

/// Baseline scenario shortened to `days`.
pub fn baseline_days(days: usize) -> ScenarioConfig {
    let mut cfg = ScenarioConfig::baseline();
    cfg.simulation.days = days;
    cfg
}

/// Baseline scenario whose sun only shines at hour 12 (200 kW).
pub fn noon_only_solar() -> ScenarioConfig {
    let mut cfg = baseline_days(1);
    cfg.solar.sunrise_hour = 11;
    cfg.solar.sunset_hour = 13;
    cfg
}

/// One large truck needing 300 kWh that arrives at noon on day 0.
pub fn single_noon_truck() -> Vec<Truck> {
    vec![Truck::with_need(12, TruckClass::Large, 300.0)]
}

/// Runs `cfg` with its own seed; panics if the scenario is invalid.
pub fn run(cfg: ScenarioConfig) -> RunResult {
    SimulationRunner::new(cfg)
        .expect("scenario should be valid")
        .run()
}

/// Runs `cfg` over a hand-built population.
pub fn run_population(cfg: ScenarioConfig, trucks: Vec<Truck>) -> RunResult {
    let config = SimConfig::new(cfg.simulation.days, cfg.simulation.seed);
    SimulationRunner::new(cfg)
        .expect("scenario should be valid")
        .run_population(config, trucks)
}
