use serde::{Deserialize, Serialize};

/// How the grid power limit is applied within one hour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridCap {
    /// Every truck may import up to the limit during its hour. Several trucks
    /// drawing at once can push the hourly total above the limit.
    #[default]
    PerTruck,
    /// The limit bounds the total import of the hour across all trucks.
    Pooled,
}

/// The depot's grid connection, last resort for truck demand.
#[derive(Debug, Clone)]
pub struct GridConnection {
    limit_kw: f32,
    cap: GridCap,
}

impl GridConnection {
    /// Creates a grid connection with the given power limit.
    ///
    /// # Panics
    ///
    /// Panics if `limit_kw` is not positive.
    pub fn new(limit_kw: f32, cap: GridCap) -> Self {
        assert!(limit_kw > 0.0, "grid limit must be > 0");
        Self { limit_kw, cap }
    }

    pub fn limit_kw(&self) -> f32 {
        self.limit_kw
    }

    pub fn cap(&self) -> GridCap {
        self.cap
    }

    /// Energy a truck may import for `need_kwh` over `duration_hours`, given
    /// what other trucks already imported this hour.
    pub fn import_kwh(&self, need_kwh: f32, imported_this_hour_kwh: f32, duration_hours: f32) -> f32 {
        let cap_kwh = self.limit_kw * duration_hours;
        let allowed = match self.cap {
            GridCap::PerTruck => cap_kwh,
            GridCap::Pooled => (cap_kwh - imported_this_hour_kwh).max(0.0),
        };
        need_kwh.min(allowed).max(0.0)
    }
}
