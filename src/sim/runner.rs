//! Multi-day simulation driver.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{InvalidScenario, ScenarioConfig};
use crate::devices::{Battery, SolarProfile, Truck, TruckClass};

use super::clock::HourClock;
use super::engine::DispatchEngine;
use super::grid::GridConnection;
use super::kpi::{DailyStats, RunKpis, daily_stats, solar_served_series};
use super::population::generate_population;
use super::types::{HourResult, SimConfig};

/// Everything a finished run produced.
///
/// Owned by the caller; nothing is kept between runs.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    /// Horizon and seed of the run.
    pub config: SimConfig,
    /// One record per simulated hour, in hour order.
    pub hours: Vec<HourResult>,
    /// One row per simulated day.
    pub daily: Vec<DailyStats>,
    /// The full truck population with final fill levels.
    pub trucks: Vec<Truck>,
    /// Aggregate indicators.
    pub kpis: RunKpis,
}

impl RunResult {
    /// Total number of simulated hours.
    pub fn total_hours(&self) -> usize {
        self.hours.len()
    }

    /// Hourly count of `class` trucks served from solar.
    pub fn solar_served_series(&self, class: TruckClass) -> Vec<u32> {
        solar_served_series(&self.hours, class)
    }
}

/// Drives a complete run of a validated scenario.
#[derive(Debug, Clone)]
pub struct SimulationRunner {
    scenario: ScenarioConfig,
}

impl SimulationRunner {
    /// Creates a runner for `scenario`.
    ///
    /// # Errors
    ///
    /// Returns every validation error if the scenario is invalid; no run is
    /// possible in that case.
    pub fn new(scenario: ScenarioConfig) -> Result<Self, InvalidScenario> {
        Ok(Self {
            scenario: scenario.validated()?,
        })
    }

    pub fn scenario(&self) -> &ScenarioConfig {
        &self.scenario
    }

    /// Runs the scenario with a generator seeded from `simulation.seed`.
    pub fn run(&self) -> RunResult {
        let mut rng = StdRng::seed_from_u64(self.scenario.simulation.seed);
        self.run_with_rng(&mut rng)
    }

    /// Runs the scenario drawing the truck population from `rng`.
    pub fn run_with_rng(&self, rng: &mut impl Rng) -> RunResult {
        let s = &self.scenario;
        let config = SimConfig::new(s.simulation.days, s.simulation.seed);
        let trucks = generate_population(&s.fleet, config.days, rng);

        info!(
            days = config.days,
            trucks = trucks.len(),
            seed = config.seed,
            "starting depot simulation"
        );

        let result = self.run_population(config, trucks);

        info!(
            hours = result.total_hours(),
            grid_kwh = result.kpis.grid_kwh,
            surplus_kwh = result.kpis.surplus_kwh,
            fulfilment_pct = result.kpis.fulfilment_pct,
            "simulation finished"
        );
        result
    }

    /// Runs the scenario over a given truck population instead of drawing one.
    ///
    /// Arrivals past the horizon are kept in the population but never
    /// dispatched.
    pub fn run_population(&self, config: SimConfig, trucks: Vec<Truck>) -> RunResult {
        let s = &self.scenario;
        let solar = SolarProfile::new(s.solar.peak_kw, s.solar.sunrise_hour, s.solar.sunset_hour);
        let battery = Battery::with_soc_fraction(
            s.battery.capacity_kwh,
            s.battery.initial_soc,
            s.battery.max_charge_kw,
            s.battery.max_discharge_kw,
        );
        let grid = GridConnection::new(s.grid.limit_kw, s.grid.cap);
        debug!(
            grid_limit_kw = grid.limit_kw(),
            grid_cap = ?grid.cap(),
            battery_kwh = battery.capacity_kwh,
            "depot models built"
        );
        let mut engine = DispatchEngine::new(solar, battery, grid, trucks);

        let mut clock = HourClock::new(config.days);
        let mut hours = Vec::with_capacity(clock.total_hours());
        clock.run(|tick| {
            let record = engine.step(tick.hour);
            if tick.end_of_day {
                debug!(
                    day = tick.day,
                    soc_kwh = record.battery_soc_kwh,
                    soc_pct = engine.battery().soc_fraction() * 100.0,
                    total_loaded_kwh = record.total_loaded_kwh,
                    "end of day"
                );
            }
            hours.push(record);
        });

        let capacity_kwh = engine.battery().capacity_kwh;
        let trucks = engine.into_trucks();
        let daily = daily_stats(&hours, &trucks, config.days);
        let kpis = RunKpis::from_run(&hours, &trucks, capacity_kwh);

        RunResult {
            config,
            hours,
            daily,
            trucks,
            kpis,
        }
    }
}
