//! Hourly dispatch engine: allocates solar, battery and grid energy to the
//! trucks present at the depot.

use tracing::debug;

use crate::devices::{Battery, ClassCounts, SolarProfile, Truck};

use super::grid::GridConnection;
use super::types::{HourResult, STEP_HOURS};

/// Dispatch engine owning the battery and the whole truck population.
///
/// Each hour is dispatched in four fixed tiers over the trucks that arrived in
/// that hour, ordered large > medium > small (population order within a
/// class):
///
/// 1. solar to trucks
/// 2. remaining solar to the battery; what is left is surplus
/// 3. battery to trucks with outstanding need
/// 4. grid to trucks with outstanding need
///
/// A truck is only present during its arrival hour. Need that is still open
/// after tier 4 is never revisited.
///
/// Battery and grid limits apply per truck: each truck in tier 3 makes its own
/// discharge call capped at `max_discharge_kw`, and each truck in tier 4 may
/// import up to the grid limit unless the cap is pooled. With several trucks
/// present the battery can therefore deliver more than `max_discharge_kw` in
/// one hour.
pub struct DispatchEngine {
    solar: SolarProfile,
    battery: Battery,
    grid: GridConnection,
    trucks: Vec<Truck>,
    /// Truck indices bucketed by arrival hour, in population order.
    arrivals: Vec<Vec<usize>>,
    next_hour: usize,
    total_loaded_kwh: f32,
}

impl DispatchEngine {
    /// Creates a new dispatch engine.
    ///
    /// # Arguments
    ///
    /// * `solar` - Solar generation profile
    /// * `battery` - Battery buffer in its initial state
    /// * `grid` - Grid connection with its power limit
    /// * `trucks` - Complete truck population in generation order
    pub fn new(
        solar: SolarProfile,
        battery: Battery,
        grid: GridConnection,
        trucks: Vec<Truck>,
    ) -> Self {
        let horizon = trucks.iter().map(|t| t.arrival_hour + 1).max().unwrap_or(0);
        let mut arrivals = vec![Vec::new(); horizon];
        for (idx, truck) in trucks.iter().enumerate() {
            arrivals[truck.arrival_hour].push(idx);
        }
        let total_loaded_kwh = trucks.iter().map(Truck::energy_loaded_kwh).sum();

        Self {
            solar,
            battery,
            grid,
            trucks,
            arrivals,
            next_hour: 0,
            total_loaded_kwh,
        }
    }

    /// Dispatches one hour and returns its record.
    ///
    /// # Panics
    ///
    /// Panics if `hour` is earlier than an hour already dispatched; battery and
    /// truck state only carry forward in time.
    ///
    /// Jumping forward is allowed. Trucks that arrived in the skipped hours are
    /// never dispatched and keep an empty load.
    pub fn step(&mut self, hour: usize) -> HourResult {
        assert!(
            hour >= self.next_hour,
            "hour {hour} dispatched after hour {}",
            self.next_hour.saturating_sub(1)
        );
        let skipped: usize = (self.next_hour..hour)
            .filter_map(|h| self.arrivals.get(h))
            .map(Vec::len)
            .sum();
        if skipped > 0 {
            debug!(
                from = self.next_hour,
                to = hour,
                trucks = skipped,
                "skipped hours, their trucks are not dispatched"
            );
        }
        self.next_hour = hour + 1;

        let solar_kw = self.solar.power_kw(hour);

        let mut order = self.arrivals.get(hour).cloned().unwrap_or_default();
        order.sort_by_key(|&idx| self.trucks[idx].class.priority_rank());

        let mut solar_served = ClassCounts::default();
        let mut served = vec![false; order.len()];

        // Tier 1: solar to trucks
        let mut remaining_solar_kwh = solar_kw * STEP_HOURS;
        let mut solar_to_trucks_kwh = 0.0_f32;
        for (pos, &idx) in order.iter().enumerate() {
            if remaining_solar_kwh <= 0.0 {
                break;
            }
            let truck = &mut self.trucks[idx];
            let loaded = truck.load(remaining_solar_kwh);
            remaining_solar_kwh -= loaded;
            solar_to_trucks_kwh += loaded;
            if loaded > 0.0 {
                solar_served.increment(truck.class);
                served[pos] = true;
            }
        }

        // Tier 2: solar surplus to battery
        let mut battery_charged_kwh = 0.0_f32;
        if remaining_solar_kwh > 0.0 {
            battery_charged_kwh = self.battery.charge(remaining_solar_kwh / STEP_HOURS, STEP_HOURS);
            remaining_solar_kwh -= battery_charged_kwh;
        }
        let surplus_kwh = remaining_solar_kwh.max(0.0);

        // Tier 3: battery to trucks
        let mut battery_discharged_kwh = 0.0_f32;
        for (pos, &idx) in order.iter().enumerate() {
            let truck = &mut self.trucks[idx];
            let need_kwh = truck.remaining_kwh();
            if need_kwh <= 0.0 {
                continue;
            }
            let delivered = self.battery.discharge(need_kwh / STEP_HOURS, STEP_HOURS);
            let loaded = truck.load(delivered);
            battery_discharged_kwh += loaded;
            served[pos] |= loaded > 0.0;
        }

        // Tier 4: grid to trucks
        let mut grid_kwh = 0.0_f32;
        let mut unmet_kwh = 0.0_f32;
        for (pos, &idx) in order.iter().enumerate() {
            let truck = &mut self.trucks[idx];
            let need_kwh = truck.remaining_kwh();
            if need_kwh <= 0.0 {
                continue;
            }
            let import = self.grid.import_kwh(need_kwh, grid_kwh, STEP_HOURS);
            let loaded = truck.load(import);
            grid_kwh += loaded;
            served[pos] |= loaded > 0.0;

            let left = truck.remaining_kwh();
            if left > 0.0 {
                debug!(
                    hour,
                    class = %truck.class,
                    unmet_kwh = left,
                    "truck leaves with unmet need"
                );
                unmet_kwh += left;
            }
        }

        let mut served_counts = ClassCounts::default();
        for (pos, &idx) in order.iter().enumerate() {
            if served[pos] {
                served_counts.increment(self.trucks[idx].class);
            }
        }

        self.total_loaded_kwh += solar_to_trucks_kwh + battery_discharged_kwh + grid_kwh;

        debug!(
            hour,
            solar_kw,
            trucks = order.len(),
            served = served_counts.total(),
            grid_kwh,
            surplus_kwh,
            soc_kwh = self.battery.soc_kwh(),
            "dispatched hour"
        );

        HourResult {
            hour,
            solar_kw,
            trucks_present: order.len(),
            solar_to_trucks_kwh,
            battery_charged_kwh,
            battery_discharged_kwh,
            grid_kwh,
            surplus_kwh,
            unmet_kwh,
            battery_soc_kwh: self.battery.soc_kwh(),
            total_loaded_kwh: self.total_loaded_kwh,
            solar_served,
            served: served_counts,
        }
    }

    /// Returns a reference to the battery.
    pub fn battery(&self) -> &Battery {
        &self.battery
    }

    /// Returns the truck population in generation order.
    pub fn trucks(&self) -> &[Truck] {
        &self.trucks
    }

    /// Consumes the engine and returns the final truck population.
    pub fn into_trucks(self) -> Vec<Truck> {
        self.trucks
    }
}
