//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::config::ScenarioConfig;
use crate::devices::{Truck, TruckClass};
use crate::sim::kpi::RunKpis;

/// Scenario and headline numbers of the run.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub scenario: ScenarioConfig,
    pub total_hours: usize,
    pub kpis: RunKpis,
}

/// One truck as exposed by the API, with its derived fields filled in.
#[derive(Debug, Serialize)]
pub struct TruckRecord {
    pub arrival_hour: usize,
    pub arrival_day: usize,
    pub class: TruckClass,
    pub energy_needed_kwh: f32,
    pub energy_loaded_kwh: f32,
    pub fully_loaded: bool,
}

impl From<&Truck> for TruckRecord {
    fn from(t: &Truck) -> Self {
        Self {
            arrival_hour: t.arrival_hour,
            arrival_day: t.arrival_day(),
            class: t.class,
            energy_needed_kwh: t.energy_needed_kwh(),
            energy_loaded_kwh: t.energy_loaded_kwh(),
            fully_loaded: t.is_full(),
        }
    }
}

/// Optional range query parameters for the hours endpoint.
#[derive(Debug, Deserialize)]
pub struct HoursQuery {
    /// Start hour (inclusive).
    pub from: Option<usize>,
    /// End hour (inclusive).
    pub to: Option<usize>,
}

/// Optional class filter for the trucks endpoint.
#[derive(Debug, Deserialize)]
pub struct TrucksQuery {
    pub class: Option<TruckClass>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
