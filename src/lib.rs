//! Truck depot energy simulator: solar, battery buffer and capped grid
//! dispatched hour by hour to arriving trucks.

/// REST API over a finished run.
#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod devices;
pub mod io;
pub mod logging;
/// Simulation engine, population, runner and KPI modules.
pub mod sim;
pub mod tables;
