//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::grid::GridCap;
use crate::sim::types::HOURS_PER_DAY;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Simulation horizon and seed.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Truck arrivals.
    #[serde(default)]
    pub fleet: FleetConfig,
    /// Solar array parameters.
    #[serde(default)]
    pub solar: SolarConfig,
    /// Battery buffer parameters.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Grid connection parameters.
    #[serde(default)]
    pub grid: GridConfig,
}

/// Simulation horizon and seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of days to simulate (must be > 0).
    pub days: usize,
    /// Master random seed.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { days: 7, seed: 42 }
    }
}

/// Truck arrival parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FleetConfig {
    /// Minimum trucks arriving per day.
    pub min_trucks_per_day: usize,
    /// Maximum trucks arriving per day.
    pub max_trucks_per_day: usize,
    /// Earliest arrival hour of day (inclusive).
    pub arrival_start_hour: usize,
    /// Latest arrival hour of day (inclusive).
    pub arrival_end_hour: usize,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            min_trucks_per_day: 20,
            max_trucks_per_day: 50,
            arrival_start_hour: 6,
            arrival_end_hour: 20,
        }
    }
}

/// Solar array parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarConfig {
    /// Output at solar noon (kW).
    pub peak_kw: f32,
    /// Hour of day generation starts (inclusive).
    pub sunrise_hour: usize,
    /// Hour of day generation has ended (inclusive, output 0).
    pub sunset_hour: usize,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            peak_kw: 200.0,
            sunrise_hour: 6,
            sunset_hour: 18,
        }
    }
}

/// Battery buffer parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Total energy capacity (kWh).
    pub capacity_kwh: f32,
    /// Maximum charging power (kW).
    pub max_charge_kw: f32,
    /// Maximum discharging power (kW).
    pub max_discharge_kw: f32,
    /// Initial state of charge as a fraction of capacity (0.0–1.0).
    pub initial_soc: f32,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            capacity_kwh: 500.0,
            max_charge_kw: 100.0,
            max_discharge_kw: 100.0,
            initial_soc: 0.5,
        }
    }
}

/// Grid connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Grid power limit (kW).
    pub limit_kw: f32,
    /// Whether the limit applies per truck (default) or to the hour's total.
    pub cap: GridCap,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            limit_kw: 100.0,
            cap: GridCap::PerTruck,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.capacity_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A scenario that failed validation, with every violated constraint.
#[derive(Debug, Error)]
#[error("invalid scenario: {}", join_errors(.0))]
pub struct InvalidScenario(pub Vec<ConfigError>);

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ScenarioConfig {
    /// Returns the baseline scenario.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// A small yard: few trucks, a modest battery and PV array.
    pub fn small_depot() -> Self {
        Self {
            fleet: FleetConfig {
                min_trucks_per_day: 5,
                max_trucks_per_day: 15,
                ..FleetConfig::default()
            },
            solar: SolarConfig {
                peak_kw: 80.0,
                ..SolarConfig::default()
            },
            battery: BatteryConfig {
                capacity_kwh: 200.0,
                max_charge_kw: 50.0,
                max_discharge_kw: 50.0,
                ..BatteryConfig::default()
            },
            grid: GridConfig {
                limit_kw: 60.0,
                ..GridConfig::default()
            },
            ..Self::default()
        }
    }

    /// A busy depot on a weak connection whose limit is shared per hour.
    pub fn weak_grid() -> Self {
        Self {
            fleet: FleetConfig {
                min_trucks_per_day: 40,
                max_trucks_per_day: 80,
                ..FleetConfig::default()
            },
            battery: BatteryConfig {
                capacity_kwh: 1000.0,
                max_charge_kw: 200.0,
                max_discharge_kw: 200.0,
                ..BatteryConfig::default()
            },
            grid: GridConfig {
                limit_kw: 50.0,
                cap: GridCap::Pooled,
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "small_depot", "weak_grid"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "small_depot" => Ok(Self::small_depot()),
            "weak_grid" => Ok(Self::weak_grid()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.simulation.days == 0 {
            errors.push(ConfigError::new("simulation.days", "must be > 0"));
        }

        let fleet = &self.fleet;
        if fleet.max_trucks_per_day == 0 {
            errors.push(ConfigError::new("fleet.max_trucks_per_day", "must be > 0"));
        }
        if fleet.min_trucks_per_day > fleet.max_trucks_per_day {
            errors.push(ConfigError::new(
                "fleet.min_trucks_per_day",
                "must be <= fleet.max_trucks_per_day",
            ));
        }
        if fleet.arrival_start_hour > fleet.arrival_end_hour {
            errors.push(ConfigError::new(
                "fleet.arrival_start_hour",
                "must be <= fleet.arrival_end_hour",
            ));
        }
        if fleet.arrival_end_hour >= HOURS_PER_DAY {
            errors.push(ConfigError::new("fleet.arrival_end_hour", "must be < 24"));
        }

        let sol = &self.solar;
        require_positive(&mut errors, "solar.peak_kw", sol.peak_kw);
        if sol.sunrise_hour >= sol.sunset_hour {
            errors.push(ConfigError::new("solar.sunrise_hour", "must be < solar.sunset_hour"));
        }
        if sol.sunset_hour > HOURS_PER_DAY {
            errors.push(ConfigError::new("solar.sunset_hour", "must be <= 24"));
        }

        let bat = &self.battery;
        require_positive(&mut errors, "battery.capacity_kwh", bat.capacity_kwh);
        require_positive(&mut errors, "battery.max_charge_kw", bat.max_charge_kw);
        require_positive(&mut errors, "battery.max_discharge_kw", bat.max_discharge_kw);
        if !(0.0..=1.0).contains(&bat.initial_soc) {
            errors.push(ConfigError::new("battery.initial_soc", "must be in [0.0, 1.0]"));
        }

        require_positive(&mut errors, "grid.limit_kw", self.grid.limit_kw);

        errors
    }

    /// Returns the scenario unchanged if it passes [`ScenarioConfig::validate`].
    ///
    /// # Errors
    ///
    /// Returns every validation error wrapped in [`InvalidScenario`].
    pub fn validated(self) -> Result<Self, InvalidScenario> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(InvalidScenario(errors))
        }
    }
}

/// NaN and infinities fail too; TOML accepts `nan` and `inf`.
fn require_positive(errors: &mut Vec<ConfigError>, field: &str, value: f32) {
    if !(value.is_finite() && value > 0.0) {
        errors.push(ConfigError::new(field, "must be a finite number > 0"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let cfg = ScenarioConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn baseline_matches_reference_depot() {
        let cfg = ScenarioConfig::baseline();
        assert_eq!(cfg.simulation.days, 7);
        assert_eq!(cfg.fleet.min_trucks_per_day, 20);
        assert_eq!(cfg.fleet.max_trucks_per_day, 50);
        assert_eq!(cfg.battery.capacity_kwh, 500.0);
        assert_eq!(cfg.battery.initial_soc, 0.5);
        assert_eq!(cfg.grid.limit_kw, 100.0);
        assert_eq!(cfg.grid.cap, GridCap::PerTruck);
        assert_eq!(cfg.solar.peak_kw, 200.0);
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
        assert_eq!(e.field, "preset");
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let errors = ScenarioConfig::from_preset(name).unwrap().validate();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn weak_grid_pools_the_limit() {
        let cfg = ScenarioConfig::weak_grid();
        assert_eq!(cfg.grid.cap, GridCap::Pooled);
        assert!(cfg.grid.limit_kw < ScenarioConfig::baseline().grid.limit_kw);
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[simulation]
days = 3
seed = 99

[fleet]
min_trucks_per_day = 10
max_trucks_per_day = 12
arrival_start_hour = 5
arrival_end_hour = 22

[solar]
peak_kw = 250.0
sunrise_hour = 5
sunset_hour = 19

[battery]
capacity_kwh = 800.0
max_charge_kw = 150.0
max_discharge_kw = 120.0
initial_soc = 0.25

[grid]
limit_kw = 75.0
cap = "pooled"
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).unwrap();
        assert_eq!(cfg.simulation.days, 3);
        assert_eq!(cfg.fleet.arrival_end_hour, 22);
        assert_eq!(cfg.battery.max_discharge_kw, 120.0);
        assert_eq!(cfg.grid.cap, GridCap::Pooled);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[battery]
capacity_kwh = 100.0
efficiency = 0.9
"#;
        assert!(ScenarioConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn invalid_grid_cap_mode() {
        let toml = r#"
[grid]
cap = "shared"
"#;
        assert!(ScenarioConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[simulation]
seed = 7
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).unwrap();
        assert_eq!(cfg.simulation.seed, 7);
        assert_eq!(cfg.simulation.days, 7);
        assert_eq!(cfg.battery.capacity_kwh, 500.0);
    }

    #[test]
    fn validation_catches_reversed_truck_range() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.fleet.min_trucks_per_day = 60;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "fleet.min_trucks_per_day"));
    }

    #[test]
    fn validation_catches_non_positive_values() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.days = 0;
        cfg.battery.capacity_kwh = 0.0;
        cfg.battery.max_charge_kw = -1.0;
        cfg.battery.max_discharge_kw = 0.0;
        cfg.grid.limit_kw = 0.0;
        cfg.solar.peak_kw = 0.0;
        let fields: Vec<String> = cfg.validate().into_iter().map(|e| e.field).collect();
        for expected in [
            "simulation.days",
            "battery.capacity_kwh",
            "battery.max_charge_kw",
            "battery.max_discharge_kw",
            "grid.limit_kw",
            "solar.peak_kw",
        ] {
            assert!(fields.iter().any(|f| f == expected), "missing {expected}");
        }
    }

    #[test]
    fn validation_catches_bad_windows() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.fleet.arrival_end_hour = 24;
        cfg.solar.sunrise_hour = 18;
        cfg.solar.sunset_hour = 6;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "fleet.arrival_end_hour"));
        assert!(errors.iter().any(|e| e.field == "solar.sunrise_hour"));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let toml = r#"
[solar]
peak_kw = nan

[battery]
capacity_kwh = inf
max_charge_kw = nan
max_discharge_kw = -inf
initial_soc = nan

[grid]
limit_kw = nan
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).unwrap();
        let fields: Vec<String> = cfg.validate().into_iter().map(|e| e.field).collect();
        for expected in [
            "solar.peak_kw",
            "battery.capacity_kwh",
            "battery.max_charge_kw",
            "battery.max_discharge_kw",
            "battery.initial_soc",
            "grid.limit_kw",
        ] {
            assert!(fields.iter().any(|f| f == expected), "missing {expected}");
        }
    }

    #[test]
    fn nan_grid_limit_is_reported_not_run() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.grid.limit_kw = f32::NAN;
        let err = cfg.validated().unwrap_err();
        assert_eq!(err.0.len(), 1);
        assert_eq!(err.0[0].field, "grid.limit_kw");
    }

    #[test]
    fn validation_catches_invalid_soc() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.battery.initial_soc = 1.5;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "battery.initial_soc"));
    }

    #[test]
    fn validated_collects_all_errors() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.grid.limit_kw = 0.0;
        cfg.battery.capacity_kwh = -5.0;
        let err = cfg.validated().unwrap_err();
        assert_eq!(err.0.len(), 2);
        let msg = err.to_string();
        assert!(msg.contains("grid.limit_kw"));
        assert!(msg.contains("battery.capacity_kwh"));
    }

    #[test]
    fn error_display_names_field() {
        let e = ConfigError::new("grid.limit_kw", "must be > 0");
        assert_eq!(e.to_string(), "config error: grid.limit_kw: must be > 0");
    }
}
