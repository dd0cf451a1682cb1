/// Hourly simulation clock.
pub mod clock;
pub mod engine;
/// Grid connection and its power cap.
pub mod grid;
pub mod kpi;
/// Truck population generation.
pub mod population;
pub mod runner;
pub mod types;
