use crate::sim::types::HOURS_PER_DAY;

/// Default peak output of the depot's PV array in kW.
pub const DEFAULT_PEAK_KW: f32 = 200.0;

/// A deterministic solar generation profile for the depot roof.
///
/// `SolarProfile` produces a triangular generation curve between sunrise and
/// sunset: zero at both window edges, rising linearly to `peak_kw` at the
/// midpoint of the window. There is no weather noise, so the output depends
/// only on the hour of day.
#[derive(Debug, Clone)]
pub struct SolarProfile {
    /// Output at the midpoint of the daylight window in kilowatts.
    pub peak_kw: f32,

    /// Hour of day at which the daylight window opens (inclusive).
    pub sunrise_hour: usize,

    /// Hour of day at which the daylight window closes (inclusive).
    pub sunset_hour: usize,
}

impl SolarProfile {
    /// Creates a new solar profile.
    ///
    /// # Arguments
    ///
    /// * `peak_kw` - Output at solar noon in kW
    /// * `sunrise_hour` - Hour of day where generation starts from zero
    /// * `sunset_hour` - Hour of day where generation has dropped back to zero
    ///
    /// # Panics
    ///
    /// Panics if `sunrise_hour >= sunset_hour` or `sunset_hour > 24`.
    pub fn new(peak_kw: f32, sunrise_hour: usize, sunset_hour: usize) -> Self {
        assert!(sunrise_hour < sunset_hour && sunset_hour <= HOURS_PER_DAY);
        Self {
            peak_kw: peak_kw.max(0.0),
            sunrise_hour,
            sunset_hour,
        }
    }

    /// Returns the generated power in kW at absolute hour `hour`.
    ///
    /// Total over all hours; only `hour % 24` is significant.
    pub fn power_kw(&self, hour: usize) -> f32 {
        let hour_of_day = hour % HOURS_PER_DAY;
        if hour_of_day < self.sunrise_hour || hour_of_day > self.sunset_hour {
            return 0.0;
        }

        let half_width = (self.sunset_hour - self.sunrise_hour) as f32 / 2.0;
        let noon = self.sunrise_hour as f32 + half_width;
        let frac = 1.0 - (noon - hour_of_day as f32).abs() / half_width;
        (frac * self.peak_kw).max(0.0)
    }
}

impl Default for SolarProfile {
    fn default() -> Self {
        Self::new(DEFAULT_PEAK_KW, 6, 18)
    }
}
