/// The depot's stationary battery buffer.
///
/// `Battery` stores solar surplus and releases it to trucks later in the
/// same hour or in later hours. Every exchange is bounded by three limits at
/// once: the energy offered or requested, the headroom (or stored energy), and
/// the rated power over the exchange duration.
///
/// State of charge is tracked in kWh and always stays within
/// `0.0..=capacity_kwh`.
#[derive(Debug, Clone)]
pub struct Battery {
    /// Battery capacity in kilowatt-hours.
    pub capacity_kwh: f32,

    /// Maximum charge power in kilowatts.
    pub max_charge_kw: f32,

    /// Maximum discharge power in kilowatts.
    pub max_discharge_kw: f32,

    /// Stored energy in kilowatt-hours.
    soc_kwh: f32,
}

impl Battery {
    /// Creates a half-full battery with the specified parameters.
    ///
    /// # Arguments
    ///
    /// * `capacity_kwh` - Battery capacity in kWh (must be > 0)
    /// * `max_charge_kw` - Maximum charging power in kW (must be > 0)
    /// * `max_discharge_kw` - Maximum discharging power in kW (must be > 0)
    ///
    /// # Panics
    ///
    /// Panics if capacity or either rate is zero or negative.
    pub fn new(capacity_kwh: f32, max_charge_kw: f32, max_discharge_kw: f32) -> Self {
        Self::with_soc_fraction(capacity_kwh, 0.5, max_charge_kw, max_discharge_kw)
    }

    /// Creates a battery with an explicit initial state of charge.
    ///
    /// # Panics
    ///
    /// Panics if capacity or either rate is non-positive, or `soc_fraction`
    /// is outside `0.0..=1.0`.
    pub fn with_soc_fraction(
        capacity_kwh: f32,
        soc_fraction: f32,
        max_charge_kw: f32,
        max_discharge_kw: f32,
    ) -> Self {
        assert!(capacity_kwh > 0.0, "capacity_kwh must be > 0");
        assert!(max_charge_kw > 0.0, "max_charge_kw must be > 0");
        assert!(max_discharge_kw > 0.0, "max_discharge_kw must be > 0");
        assert!((0.0..=1.0).contains(&soc_fraction));

        Self {
            capacity_kwh,
            max_charge_kw,
            max_discharge_kw,
            soc_kwh: capacity_kwh * soc_fraction,
        }
    }

    /// Stored energy in kWh.
    pub fn soc_kwh(&self) -> f32 {
        self.soc_kwh
    }

    /// Stored energy as a fraction of capacity.
    pub fn soc_fraction(&self) -> f32 {
        self.soc_kwh / self.capacity_kwh
    }

    /// Charges from `available_kw` for `duration_hours` and returns the
    /// energy actually accepted in kWh.
    ///
    /// Zero or negative offers yield zero.
    pub fn charge(&mut self, available_kw: f32, duration_hours: f32) -> f32 {
        let headroom_kwh = self.capacity_kwh - self.soc_kwh;
        let charged = (available_kw * duration_hours)
            .min(headroom_kwh)
            .min(self.max_charge_kw * duration_hours)
            .max(0.0);

        self.soc_kwh = (self.soc_kwh + charged).min(self.capacity_kwh);
        charged
    }

    /// Discharges up to `requested_kw` for `duration_hours` and returns the
    /// energy actually delivered in kWh.
    pub fn discharge(&mut self, requested_kw: f32, duration_hours: f32) -> f32 {
        let discharged = (requested_kw * duration_hours)
            .min(self.soc_kwh)
            .min(self.max_discharge_kw * duration_hours)
            .max(0.0);

        self.soc_kwh = (self.soc_kwh - discharged).max(0.0);
        discharged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_battery_starts_half_full() {
        let battery = Battery::new(500.0, 100.0, 80.0);
        assert_eq!(battery.capacity_kwh, 500.0);
        assert_eq!(battery.max_charge_kw, 100.0);
        assert_eq!(battery.max_discharge_kw, 80.0);
        assert_eq!(battery.soc_kwh(), 250.0);
        assert_eq!(battery.soc_fraction(), 0.5);
    }

    #[test]
    #[should_panic]
    fn test_invalid_capacity() {
        Battery::new(0.0, 100.0, 100.0);
    }

    #[test]
    #[should_panic]
    fn test_invalid_charge_rate() {
        Battery::new(500.0, 0.0, 100.0);
    }

    #[test]
    #[should_panic]
    fn test_invalid_soc_fraction() {
        Battery::with_soc_fraction(500.0, 1.1, 100.0, 100.0);
    }

    #[test]
    fn test_charge_rate_limit() {
        let mut battery = Battery::new(500.0, 100.0, 100.0);
        let charged = battery.charge(180.0, 1.0);
        assert_eq!(charged, 100.0);
        assert_eq!(battery.soc_kwh(), 350.0);
    }

    #[test]
    fn test_charge_headroom_limit() {
        let mut battery = Battery::with_soc_fraction(500.0, 0.9, 100.0, 100.0);
        let charged = battery.charge(100.0, 1.0);
        assert!((charged - 50.0).abs() < 1e-3);
        assert_eq!(battery.soc_kwh(), 500.0);
    }

    #[test]
    fn test_charge_offer_limit() {
        let mut battery = Battery::new(500.0, 100.0, 100.0);
        assert_eq!(battery.charge(30.0, 1.0), 30.0);
        assert_eq!(battery.soc_kwh(), 280.0);
    }

    #[test]
    fn test_charge_at_capacity_returns_zero() {
        let mut battery = Battery::with_soc_fraction(500.0, 1.0, 100.0, 100.0);
        for _ in 0..5 {
            assert_eq!(battery.charge(200.0, 1.0), 0.0);
        }
        assert_eq!(battery.soc_kwh(), 500.0);
    }

    #[test]
    fn test_non_positive_offer_yields_zero() {
        let mut battery = Battery::new(500.0, 100.0, 100.0);
        assert_eq!(battery.charge(0.0, 1.0), 0.0);
        assert_eq!(battery.charge(-40.0, 1.0), 0.0);
        assert_eq!(battery.discharge(-40.0, 1.0), 0.0);
        assert_eq!(battery.soc_kwh(), 250.0);
    }

    #[test]
    fn test_discharge_rate_limit() {
        let mut battery = Battery::new(500.0, 100.0, 100.0);
        assert_eq!(battery.discharge(300.0, 1.0), 100.0);
        assert_eq!(battery.soc_kwh(), 150.0);
    }

    #[test]
    fn test_discharge_soc_limit() {
        let mut battery = Battery::with_soc_fraction(100.0, 0.2, 100.0, 100.0);
        let delivered = battery.discharge(80.0, 1.0);
        assert!((delivered - 20.0).abs() < 1e-4);
        assert_eq!(battery.soc_kwh(), 0.0);
        assert_eq!(battery.discharge(80.0, 1.0), 0.0);
    }

    #[test]
    fn test_duration_scales_limits() {
        let mut battery = Battery::with_soc_fraction(500.0, 0.0, 100.0, 100.0);
        assert_eq!(battery.charge(200.0, 0.5), 50.0);
        assert_eq!(battery.charge(200.0, 2.0), 200.0);
    }

    #[test]
    fn test_soc_stays_in_bounds_over_mixed_sequence() {
        let mut battery = Battery::new(300.0, 120.0, 90.0);
        let requests = [250.0, -10.0, 400.0, 0.0, 75.0, 500.0, 12.5, 300.0];
        for (i, &kw) in requests.iter().enumerate() {
            if i % 2 == 0 {
                let offered = kw * 1.0;
                let headroom = battery.capacity_kwh - battery.soc_kwh();
                let charged = battery.charge(kw, 1.0);
                assert!(charged <= offered.max(0.0));
                assert!(charged <= headroom + 1e-4);
                assert!(charged <= battery.max_charge_kw);
            } else {
                battery.discharge(kw, 1.0);
            }
            assert!(battery.soc_kwh() >= 0.0);
            assert!(battery.soc_kwh() <= battery.capacity_kwh);
        }
    }
}
