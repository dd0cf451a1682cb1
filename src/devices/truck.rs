use rand::Rng;
use serde::Serialize;

use crate::devices::types::TruckClass;

/// One truck charging session at the depot.
///
/// A truck arrives at `arrival_hour` with a fixed energy need and can only be
/// charged during that single hour. It is kept in the population afterwards
/// so its final fill level can be reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Truck {
    /// Absolute simulation hour of arrival.
    pub arrival_hour: usize,

    /// Size category; sets the need range and dispatch priority.
    pub class: TruckClass,

    /// Energy the truck wants to take on in kWh.
    energy_needed_kwh: f32,

    /// Energy loaded so far in kWh (`0.0..=energy_needed_kwh`).
    energy_loaded_kwh: f32,
}

impl Truck {
    /// Creates a truck whose need is drawn uniformly (whole kWh) from the
    /// class range.
    pub fn new(arrival_hour: usize, class: TruckClass, rng: &mut impl Rng) -> Self {
        let need = rng.random_range(class.energy_need_range_kwh());
        Self::with_need(arrival_hour, class, need as f32)
    }

    /// Creates a truck with a fixed energy need.
    ///
    /// # Panics
    ///
    /// Panics if `energy_needed_kwh` is negative.
    pub fn with_need(arrival_hour: usize, class: TruckClass, energy_needed_kwh: f32) -> Self {
        assert!(energy_needed_kwh >= 0.0);
        Self {
            arrival_hour,
            class,
            energy_needed_kwh,
            energy_loaded_kwh: 0.0,
        }
    }

    /// Energy the truck wants to take on in kWh; fixed at arrival.
    pub fn energy_needed_kwh(&self) -> f32 {
        self.energy_needed_kwh
    }

    pub fn energy_loaded_kwh(&self) -> f32 {
        self.energy_loaded_kwh
    }

    /// Outstanding need in kWh.
    pub fn remaining_kwh(&self) -> f32 {
        (self.energy_needed_kwh - self.energy_loaded_kwh).max(0.0)
    }

    pub fn is_full(&self) -> bool {
        self.remaining_kwh() <= 0.0
    }

    /// Day index of the arrival.
    pub fn arrival_day(&self) -> usize {
        self.arrival_hour / crate::sim::types::HOURS_PER_DAY
    }

    /// Loads up to `available_kwh` and returns the amount accepted.
    ///
    /// Once the truck is full every call returns zero.
    pub fn load(&mut self, available_kwh: f32) -> f32 {
        let loaded = available_kwh.min(self.remaining_kwh()).max(0.0);
        self.energy_loaded_kwh = (self.energy_loaded_kwh + loaded).min(self.energy_needed_kwh);
        loaded
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn need_is_drawn_from_class_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for class in TruckClass::ALL {
            let range = class.energy_need_range_kwh();
            for _ in 0..200 {
                let truck = Truck::new(10, class, &mut rng);
                let need = truck.energy_needed_kwh();
                assert!(need >= *range.start() as f32 && need <= *range.end() as f32);
                assert_eq!(need.fract(), 0.0);
                assert_eq!(truck.energy_loaded_kwh(), 0.0);
            }
        }
    }

    #[test]
    fn load_is_capped_by_remaining_need() {
        let mut truck = Truck::with_need(12, TruckClass::Medium, 180.0);
        assert_eq!(truck.load(100.0), 100.0);
        assert_eq!(truck.load(100.0), 80.0);
        assert!(truck.is_full());
        assert_eq!(truck.energy_loaded_kwh(), 180.0);
    }

    #[test]
    fn full_truck_accepts_nothing() {
        let mut truck = Truck::with_need(12, TruckClass::Small, 60.0);
        truck.load(60.0);
        for _ in 0..3 {
            assert_eq!(truck.load(500.0), 0.0);
        }
        assert_eq!(truck.energy_loaded_kwh(), 60.0);
    }

    #[test]
    fn negative_offer_is_ignored() {
        let mut truck = Truck::with_need(12, TruckClass::Small, 60.0);
        assert_eq!(truck.load(-5.0), 0.0);
        assert_eq!(truck.energy_loaded_kwh(), 0.0);
    }

    #[test]
    fn loaded_energy_is_monotonic() {
        let mut truck = Truck::with_need(3, TruckClass::Large, 333.0);
        let mut previous = 0.0;
        for offer in [10.0, 0.0, 55.5, -3.0, 120.0, 400.0, 1.0] {
            truck.load(offer);
            let now = truck.energy_loaded_kwh();
            assert!(now >= previous);
            assert!(now <= truck.energy_needed_kwh());
            previous = now;
        }
    }

    #[test]
    fn need_is_fixed_while_loading() {
        let mut truck = Truck::with_need(7, TruckClass::Medium, 200.0);
        truck.load(150.0);
        assert_eq!(truck.energy_needed_kwh(), 200.0);
        assert_eq!(truck.remaining_kwh(), 50.0);
        truck.load(150.0);
        assert_eq!(truck.energy_needed_kwh(), 200.0);
        assert_eq!(truck.energy_loaded_kwh(), truck.energy_needed_kwh());
    }

    #[test]
    #[should_panic]
    fn nan_need_is_rejected() {
        Truck::with_need(7, TruckClass::Small, f32::NAN);
    }

    #[test]
    fn arrival_day_from_hour() {
        assert_eq!(Truck::with_need(23, TruckClass::Small, 1.0).arrival_day(), 0);
        assert_eq!(Truck::with_need(24, TruckClass::Small, 1.0).arrival_day(), 1);
        assert_eq!(Truck::with_need(55, TruckClass::Small, 1.0).arrival_day(), 2);
    }
}
