/// A point or length in time expressed as `value` units of `1/rate` seconds.
///
/// The default value `(0, 0)` is the canonical "unset" zero: it compares equal to no
/// properly rated time and formats as the zero literal.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RationalTime {
    /// Count of time units.
    pub value: f64,
    /// Units per second.
    pub rate: f64,
}

impl RationalTime {
    /// Create a rational time.
    pub fn new(value: f64, rate: f64) -> Self {
        Self { value, rate }
    }

    /// Convert to seconds. Non-positive rates yield `0.0`.
    pub fn to_seconds(self) -> f64 {
        if self.rate > 0.0 {
            self.value / self.rate
        } else {
            0.0
        }
    }

    /// Return `true` when the rate is set (strictly positive).
    pub fn has_rate(self) -> bool {
        self.rate > 0.0
    }

    /// Express the same instant at `rate`. Unset times stay zero.
    pub fn rescaled_to(self, rate: f64) -> Self {
        if !self.has_rate() || self.rate == rate {
            return self;
        }
        Self::new(self.value * rate / self.rate, rate)
    }
}

/// Half-open window `[start_time, start_time + duration)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeRange {
    /// Range start.
    pub start_time: RationalTime,
    /// Range length.
    pub duration: RationalTime,
}

impl TimeRange {
    /// Create a range from its start and length.
    pub fn new(start_time: RationalTime, duration: RationalTime) -> Self {
        Self {
            start_time,
            duration,
        }
    }

    /// End of the range in seconds.
    pub fn end_seconds(self) -> f64 {
        self.start_time.to_seconds() + self.duration.to_seconds()
    }
}
