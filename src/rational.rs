//! FCPXML rational time syntax: `"<value>/<rate>s"`.

use crate::timeline::time::RationalTime;

/// Rate applied to bare numbers such as `"24"` or `"3s"`.
pub const DEFAULT_RATE: f64 = 24.0;

/// Literal written for times without a usable rate.
pub const ZERO_TIME_LITERAL: &str = "0/1s";

const UNIT_SUFFIX: char = 's';

/// Text that is neither a fraction nor a bare number.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid rational time '{text}'")]
pub struct MalformedTime {
    /// The rejected input.
    pub text: String,
}

/// Parser/formatter for rational time attributes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeCodec {
    /// Rate assigned to bare numbers.
    pub default_rate: f64,
}

impl Default for TimeCodec {
    fn default() -> Self {
        Self {
            default_rate: DEFAULT_RATE,
        }
    }
}

impl TimeCodec {
    /// Codec with a custom rate for bare numbers.
    pub fn with_default_rate(default_rate: f64) -> Self {
        Self { default_rate }
    }

    /// Parse `"1001/30000s"`, `"1001/30000"`, `"24"` or `"2.5s"`.
    ///
    /// Empty input is the absent-attribute case and yields the unset zero `(0, 0)`.
    pub fn parse(&self, text: &str) -> Result<RationalTime, MalformedTime> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(RationalTime::default());
        }

        let body = trimmed.strip_suffix(UNIT_SUFFIX).unwrap_or(trimmed);
        let malformed = || MalformedTime {
            text: text.to_owned(),
        };

        match body.split_once('/') {
            Some((num, den)) => {
                let value = parse_real(num).ok_or_else(malformed)?;
                let rate = parse_real(den).ok_or_else(malformed)?;
                Ok(RationalTime::new(value, rate))
            }
            None => {
                let value = parse_real(body).ok_or_else(malformed)?;
                Ok(RationalTime::new(value, self.default_rate))
            }
        }
    }

    /// Format as `"<value>/<rate>s"`, truncating both parts to integers.
    ///
    /// Non-positive rates produce [`ZERO_TIME_LITERAL`].
    pub fn format(&self, time: RationalTime) -> String {
        if !time.has_rate() {
            return ZERO_TIME_LITERAL.to_owned();
        }
        let value = time.value.trunc() as i64;
        let rate = time.rate.trunc() as i64;
        if rate <= 0 {
            return ZERO_TIME_LITERAL.to_owned();
        }
        format!("{value}/{rate}{UNIT_SUFFIX}")
    }
}

fn parse_real(s: &str) -> Option<f64> {
    let v: f64 = s.trim().parse().ok()?;
    v.is_finite().then_some(v)
}

/// Parse with the default codec.
pub fn parse_rational_time(text: &str) -> Result<RationalTime, MalformedTime> {
    TimeCodec::default().parse(text)
}

/// Format with the default codec.
pub fn format_rational_time(time: RationalTime) -> String {
    TimeCodec::default().format(time)
}

#[cfg(test)]
#[path = "../tests/unit/rational.rs"]
mod tests;
