//! Post-hoc daily rollups and run KPIs computed from the hourly records and
//! the final truck population.

use std::fmt;

use serde::Serialize;

use crate::devices::{ClassCounts, Truck, TruckClass};

use super::types::{HOURS_PER_DAY, HourResult};

/// Reference truck energy used to normalise the daily average load
/// percentage. Deliberately fixed rather than each truck's own need.
pub const REFERENCE_TRUCK_KWH: f32 = 200.0;

/// One row of the per-day table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyStats {
    /// Day index.
    pub day: usize,
    /// Trucks that arrived on this day.
    pub truck_count: usize,
    /// Energy loaded on this day's trucks as a percentage of
    /// `truck_count * REFERENCE_TRUCK_KWH`.
    pub avg_load_pct: f32,
    /// Battery state of charge after the last hour of the day (kWh).
    pub end_soc_kwh: f32,
    /// Grid energy imported during the day (kWh).
    pub grid_kwh: f32,
    /// Curtailed solar during the day (kWh).
    pub surplus_kwh: f32,
    /// Solar generation during the day (kWh).
    pub solar_kwh: f32,
    /// Need left open by trucks departing during the day (kWh).
    pub unmet_kwh: f32,
}

/// Rolls the hourly records and the truck population up into one row per day.
///
/// `hours` must cover whole days starting at hour 0.
pub fn daily_stats(hours: &[HourResult], trucks: &[Truck], days: usize) -> Vec<DailyStats> {
    (0..days)
        .map(|day| {
            let start = (day * HOURS_PER_DAY).min(hours.len());
            let end = ((day + 1) * HOURS_PER_DAY).min(hours.len());
            let slice = &hours[start..end];

            let (truck_count, loaded_kwh) = trucks
                .iter()
                .filter(|t| t.arrival_day() == day)
                .fold((0_usize, 0.0_f32), |(n, kwh), t| (n + 1, kwh + t.energy_loaded_kwh()));
            let avg_load_pct = if truck_count > 0 {
                loaded_kwh / (truck_count as f32 * REFERENCE_TRUCK_KWH) * 100.0
            } else {
                0.0
            };

            DailyStats {
                day,
                truck_count,
                avg_load_pct,
                end_soc_kwh: slice.last().map_or(0.0, |r| r.battery_soc_kwh),
                grid_kwh: slice.iter().map(|r| r.grid_kwh).sum(),
                surplus_kwh: slice.iter().map(|r| r.surplus_kwh).sum(),
                solar_kwh: slice.iter().map(|r| r.solar_kw).sum(),
                unmet_kwh: slice.iter().map(|r| r.unmet_kwh).sum(),
            }
        })
        .collect()
}

/// Hourly count of trucks of `class` that were served from solar.
pub fn solar_served_series(hours: &[HourResult], class: TruckClass) -> Vec<u32> {
    hours.iter().map(|r| r.solar_served.get(class)).collect()
}

/// Aggregate indicators of a complete run.
#[derive(Debug, Clone, Serialize)]
pub struct RunKpis {
    /// Total solar generation (kWh).
    pub solar_kwh: f32,
    /// Solar loaded directly into trucks (kWh).
    pub solar_to_trucks_kwh: f32,
    /// Total grid import (kWh).
    pub grid_kwh: f32,
    /// Total curtailed solar (kWh).
    pub surplus_kwh: f32,
    /// Battery energy charged plus discharged (kWh).
    pub battery_throughput_kwh: f32,
    /// Battery equivalent full cycles (throughput / 2*capacity).
    pub battery_equivalent_full_cycles: f32,
    /// Peak hourly grid import (kWh in one hour).
    pub peak_grid_kwh: f32,
    /// Sum of all truck needs (kWh).
    pub energy_needed_kwh: f32,
    /// Sum of all energy loaded (kWh).
    pub energy_loaded_kwh: f32,
    /// Loaded over needed, as a percentage.
    pub fulfilment_pct: f32,
    /// Trucks in the population.
    pub truck_count: usize,
    /// Trucks that left completely full.
    pub fully_loaded_count: usize,
    /// Solar-served truck-hours per class.
    pub solar_served_by_class: ClassCounts,
    /// Energy loaded per class (kWh), indexed small, medium, large.
    pub loaded_kwh_by_class: [f32; 3],
}

impl RunKpis {
    /// Computes all KPIs from the hourly records and final population.
    pub fn from_run(hours: &[HourResult], trucks: &[Truck], battery_capacity_kwh: f32) -> Self {
        let mut solar_served_by_class = ClassCounts::default();
        let mut solar_kwh = 0.0_f32;
        let mut solar_to_trucks_kwh = 0.0_f32;
        let mut grid_kwh = 0.0_f32;
        let mut surplus_kwh = 0.0_f32;
        let mut throughput = 0.0_f32;
        let mut peak_grid_kwh = 0.0_f32;

        for r in hours {
            solar_kwh += r.solar_kw;
            solar_to_trucks_kwh += r.solar_to_trucks_kwh;
            grid_kwh += r.grid_kwh;
            surplus_kwh += r.surplus_kwh;
            throughput += r.battery_charged_kwh + r.battery_discharged_kwh;
            peak_grid_kwh = peak_grid_kwh.max(r.grid_kwh);
            solar_served_by_class += r.solar_served;
        }

        let mut loaded_kwh_by_class = [0.0_f32; 3];
        let mut energy_needed_kwh = 0.0_f32;
        let mut energy_loaded_kwh = 0.0_f32;
        let mut fully_loaded_count = 0;
        for t in trucks {
            loaded_kwh_by_class[t.class.index()] += t.energy_loaded_kwh();
            energy_needed_kwh += t.energy_needed_kwh();
            energy_loaded_kwh += t.energy_loaded_kwh();
            if t.is_full() {
                fully_loaded_count += 1;
            }
        }

        let fulfilment_pct = if energy_needed_kwh > 0.0 {
            100.0 * energy_loaded_kwh / energy_needed_kwh
        } else {
            0.0
        };
        let battery_equivalent_full_cycles = if battery_capacity_kwh > 0.0 {
            throughput / (2.0 * battery_capacity_kwh)
        } else {
            0.0
        };

        Self {
            solar_kwh,
            solar_to_trucks_kwh,
            grid_kwh,
            surplus_kwh,
            battery_throughput_kwh: throughput,
            battery_equivalent_full_cycles,
            peak_grid_kwh,
            energy_needed_kwh,
            energy_loaded_kwh,
            fulfilment_pct,
            truck_count: trucks.len(),
            fully_loaded_count,
            solar_served_by_class,
            loaded_kwh_by_class,
        }
    }

    /// Energy loaded into trucks of `class` (kWh).
    pub fn loaded_kwh(&self, class: TruckClass) -> f32 {
        self.loaded_kwh_by_class[class.index()]
    }
}

impl fmt::Display for RunKpis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Depot Report ---")?;
        writeln!(
            f,
            "Trucks:                {} ({} fully loaded)",
            self.truck_count, self.fully_loaded_count
        )?;
        writeln!(
            f,
            "Energy loaded:         {:.1} / {:.1} kWh ({:.1}%)",
            self.energy_loaded_kwh, self.energy_needed_kwh, self.fulfilment_pct
        )?;
        writeln!(
            f,
            "Solar generated:       {:.1} kWh ({:.1} kWh direct to trucks)",
            self.solar_kwh, self.solar_to_trucks_kwh
        )?;
        writeln!(f, "Solar surplus:         {:.1} kWh", self.surplus_kwh)?;
        writeln!(
            f,
            "Grid import:           {:.1} kWh (peak {:.1} kWh/h)",
            self.grid_kwh, self.peak_grid_kwh
        )?;
        writeln!(
            f,
            "Battery throughput:    {:.1} kWh ({:.2} equiv. cycles)",
            self.battery_throughput_kwh, self.battery_equivalent_full_cycles
        )?;
        for class in TruckClass::ALL {
            writeln!(
                f,
                "  {:<7} solar-served {:>5}  loaded {:>9.1} kWh",
                class.as_str(),
                self.solar_served_by_class.get(class),
                self.loaded_kwh(class)
            )?;
        }
        Ok(())
    }
}
