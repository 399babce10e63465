//! Relative time-range presets
//!
//! Callers pick a window like "last 15 days" or "last year"; this module
//! resolves the token into concrete datetime bounds and normalizes
//! caller-supplied bound pairs.

use crate::error::AnalyticsError;
use chrono::{DateTime, Duration, Utc};

/// Supported relative windows, anchored at a caller-supplied "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePreset {
    FifteenDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
}

impl RangePreset {
    /// Parse the wire tokens `15d`, `1m`, `3m`, `6m`, `1y`.
    pub fn parse(token: &str) -> Result<Self, AnalyticsError> {
        match token {
            "15d" => Ok(RangePreset::FifteenDays),
            "1m" => Ok(RangePreset::OneMonth),
            "3m" => Ok(RangePreset::ThreeMonths),
            "6m" => Ok(RangePreset::SixMonths),
            "1y" => Ok(RangePreset::OneYear),
            other => Err(AnalyticsError::InvalidRange(format!(
                "unknown range option '{other}'"
            ))),
        }
    }

    fn days(&self) -> i64 {
        match self {
            RangePreset::FifteenDays => 15,
            RangePreset::OneMonth => 30,
            RangePreset::ThreeMonths => 90,
            RangePreset::SixMonths => 180,
            RangePreset::OneYear => 365,
        }
    }

    /// Concrete `(start, end)` bounds ending at `now`
    pub fn resolve(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (now - Duration::days(self.days()), now)
    }
}

/// Order a caller-supplied bound pair so start <= end.
pub fn order_bounds(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    if start > end {
        (end, start)
    } else {
        (start, end)
    }
}
