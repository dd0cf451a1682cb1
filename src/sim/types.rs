//! Core simulation types: timing configuration and per-hour records.

use std::fmt;

use serde::Serialize;

use crate::devices::ClassCounts;

/// Number of simulated hours per day.
pub const HOURS_PER_DAY: usize = 24;

/// Duration of one dispatch step in hours. With one-hour steps kW and kWh
/// are numerically interchangeable.
pub const STEP_HOURS: f32 = 1.0;

/// Simulation horizon and random seed.
///
/// # Examples
///
/// ```
/// use depot_sim::sim::types::SimConfig;
///
/// let cfg = SimConfig::new(7, 42);
/// assert_eq!(cfg.total_hours(), 168);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct SimConfig {
    /// Number of days to simulate.
    pub days: usize,
    /// Master random seed for reproducibility.
    pub seed: u64,
}

impl SimConfig {
    /// Creates a new simulation configuration.
    ///
    /// # Panics
    ///
    /// Panics if `days` is zero.
    pub fn new(days: usize, seed: u64) -> Self {
        assert!(days > 0, "days must be > 0");
        Self { days, seed }
    }

    /// Total number of simulated hours across all days.
    pub fn total_hours(&self) -> usize {
        self.days * HOURS_PER_DAY
    }
}

/// Complete record of one dispatched hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourResult {
    /// Absolute hour index.
    pub hour: usize,
    /// Solar generation this hour (kW).
    pub solar_kw: f32,
    /// Number of trucks that arrived this hour.
    pub trucks_present: usize,
    /// Solar energy loaded directly into trucks (kWh).
    pub solar_to_trucks_kwh: f32,
    /// Solar energy stored in the battery (kWh).
    pub battery_charged_kwh: f32,
    /// Battery energy delivered to trucks (kWh).
    pub battery_discharged_kwh: f32,
    /// Grid energy imported for trucks (kWh).
    pub grid_kwh: f32,
    /// Solar energy neither loaded nor stored (kWh).
    pub surplus_kwh: f32,
    /// Need still outstanding when the hour ended (kWh).
    pub unmet_kwh: f32,
    /// Battery state of charge after the hour (kWh).
    pub battery_soc_kwh: f32,
    /// Energy loaded into all trucks since the start of the run (kWh).
    pub total_loaded_kwh: f32,
    /// Trucks that took a non-zero amount of solar energy, per class.
    pub solar_served: ClassCounts,
    /// Trucks that took energy from any source, per class.
    pub served: ClassCounts,
}

impl HourResult {
    /// Day index of this hour.
    pub fn day(&self) -> usize {
        self.hour / HOURS_PER_DAY
    }

    /// Hour of day (0..24).
    pub fn hour_of_day(&self) -> usize {
        self.hour % HOURS_PER_DAY
    }
}

impl fmt::Display for HourResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "h={:>4} (d{} {:>2}:00) | solar={:>6.1} kW  trucks={:>2} | \
             pv->trucks={:>6.1}  pv->bat={:>5.1}  bat->trucks={:>5.1}  grid={:>6.1} \
             surplus={:>5.1} unmet={:>6.1} kWh | SoC={:>6.1} kWh | served S/M/L={}/{}/{}",
            self.hour,
            self.day(),
            self.hour_of_day(),
            self.solar_kw,
            self.trucks_present,
            self.solar_to_trucks_kwh,
            self.battery_charged_kwh,
            self.battery_discharged_kwh,
            self.grid_kwh,
            self.surplus_kwh,
            self.unmet_kwh,
            self.battery_soc_kwh,
            self.solar_served.small,
            self.solar_served.medium,
            self.solar_served.large,
        )
    }
}
