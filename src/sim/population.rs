//! Truck population generation.

use rand::Rng;

use crate::config::FleetConfig;
use crate::devices::{Truck, TruckClass};

use super::types::HOURS_PER_DAY;

/// Generates the full truck population for `days` simulated days.
///
/// For each day a truck count is drawn uniformly from the fleet range; each
/// truck then draws, in this order, its arrival hour within the arrival
/// window, its class, and its energy need. Trucks are returned in draw order.
///
/// # Panics
///
/// Panics if the fleet ranges are reversed.
pub fn generate_population(fleet: &FleetConfig, days: usize, rng: &mut impl Rng) -> Vec<Truck> {
    assert!(fleet.min_trucks_per_day <= fleet.max_trucks_per_day);
    assert!(fleet.arrival_start_hour <= fleet.arrival_end_hour);

    let mut trucks = Vec::new();
    for day in 0..days {
        let count = rng.random_range(fleet.min_trucks_per_day..=fleet.max_trucks_per_day);
        for _ in 0..count {
            let hour_of_day = rng.random_range(fleet.arrival_start_hour..=fleet.arrival_end_hour);
            let class = TruckClass::ALL[rng.random_range(0..TruckClass::ALL.len())];
            trucks.push(Truck::new(day * HOURS_PER_DAY + hour_of_day, class, rng));
        }
    }
    trucks
}
