//! Depot device models: solar array, battery buffer and trucks.

/// Stationary battery storage model.
pub mod battery;
/// Solar photovoltaic generation model.
pub mod solar;
/// Truck charging session model.
pub mod truck;
pub mod types;

// Re-export the main types for convenience
pub use battery::Battery;
pub use solar::SolarProfile;
pub use truck::Truck;
pub use types::ClassCounts;
pub use types::TruckClass;
