//! Common types shared by the depot devices.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Truck size category.
///
/// The class determines both the range the energy need is drawn from and the
/// dispatch priority: larger trucks are served first on every tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruckClass {
    Small,
    Medium,
    Large,
}

impl TruckClass {
    /// All classes in population draw order.
    pub const ALL: [TruckClass; 3] = [TruckClass::Small, TruckClass::Medium, TruckClass::Large];

    /// Dispatch rank indexed by [`TruckClass::index`]; lower is served first.
    const PRIORITY_RANK: [u8; 3] = [2, 1, 0];

    /// Stable index of the class, used for per-class lookups.
    pub const fn index(self) -> usize {
        match self {
            TruckClass::Small => 0,
            TruckClass::Medium => 1,
            TruckClass::Large => 2,
        }
    }

    /// Dispatch priority rank (0 = highest priority).
    pub const fn priority_rank(self) -> u8 {
        Self::PRIORITY_RANK[self.index()]
    }

    /// Inclusive range of the energy need in kWh for this class.
    pub const fn energy_need_range_kwh(self) -> RangeInclusive<u32> {
        match self {
            TruckClass::Small => 50..=150,
            TruckClass::Medium => 150..=250,
            TruckClass::Large => 250..=400,
        }
    }

    /// Lowercase name used in config, CSV and API output.
    pub const fn as_str(self) -> &'static str {
        match self {
            TruckClass::Small => "small",
            TruckClass::Medium => "medium",
            TruckClass::Large => "large",
        }
    }
}

impl fmt::Display for TruckClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A per-class counter, e.g. trucks served in one hour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassCounts {
    pub small: u32,
    pub medium: u32,
    pub large: u32,
}

impl ClassCounts {
    /// Increments the counter for `class`.
    pub fn increment(&mut self, class: TruckClass) {
        match class {
            TruckClass::Small => self.small += 1,
            TruckClass::Medium => self.medium += 1,
            TruckClass::Large => self.large += 1,
        }
    }

    /// Returns the count for `class`.
    pub fn get(&self, class: TruckClass) -> u32 {
        match class {
            TruckClass::Small => self.small,
            TruckClass::Medium => self.medium,
            TruckClass::Large => self.large,
        }
    }

    pub fn total(&self) -> u32 {
        self.small + self.medium + self.large
    }
}

impl std::ops::AddAssign for ClassCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.small += rhs.small;
        self.medium += rhs.medium;
        self.large += rhs.large;
    }
}
