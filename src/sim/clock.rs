use super::types::HOURS_PER_DAY;

/// One tick of the [`HourClock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Absolute hour index.
    pub hour: usize,
    /// Day index.
    pub day: usize,
    /// True on the last hour of a day.
    pub end_of_day: bool,
}

/// An hourly simulation clock over a whole number of days.
///
/// Hours are handed out strictly in increasing order, which is what the
/// dispatch engine relies on for carrying battery state forward.
///
/// # Examples
///
/// ```
/// use depot_sim::sim::clock::HourClock;
///
/// let mut clock = HourClock::new(1);
/// let mut hours = Vec::new();
///
/// clock.run(|tick| hours.push(tick.hour));
/// assert_eq!(hours, (0..24).collect::<Vec<_>>());
/// ```
pub struct HourClock {
    current: usize,
    total: usize,
}

impl HourClock {
    /// Creates a clock covering `days` full days.
    pub fn new(days: usize) -> Self {
        Self {
            current: 0,
            total: days * HOURS_PER_DAY,
        }
    }

    /// Total number of hours this clock covers.
    pub fn total_hours(&self) -> usize {
        self.total
    }

    /// Advances the clock by one hour, `None` once all hours are consumed.
    pub fn tick(&mut self) -> Option<Tick> {
        if self.current >= self.total {
            return None;
        }
        let hour = self.current;
        self.current += 1;
        Some(Tick {
            hour,
            day: hour / HOURS_PER_DAY,
            end_of_day: hour % HOURS_PER_DAY == HOURS_PER_DAY - 1,
        })
    }

    /// Runs `f` for every remaining hour.
    pub fn run(&mut self, mut f: impl FnMut(Tick)) {
        while let Some(tick) = self.tick() {
            f(tick);
        }
    }
}
