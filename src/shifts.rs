//! Work-shift schedule
//!
//! Shifts are named `[start, end)` time-of-day windows supplied by the
//! configuration layer. The night shift is allowed to cross midnight
//! (start > end); such a shift matches a time that is at or after its start
//! OR strictly before its end. Lookups against a shift name outside the
//! schedule fail fast rather than defaulting.

use crate::error::AnalyticsError;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One named shift window, end-exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Shift {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Whether the window crosses midnight. A start equal to the end is
    /// treated as an empty, non-wrapping window.
    pub fn wraps_midnight(&self) -> bool {
        self.start > self.end
    }

    /// Shift membership for a time of day.
    ///
    /// A wrapping shift (e.g. 22:00-06:00) matches `t >= start || t < end`;
    /// a plain range check would match nothing for it.
    pub fn contains(&self, t: NaiveTime) -> bool {
        if self.wraps_midnight() {
            t >= self.start || t < self.end
        } else {
            self.start <= t && t < self.end
        }
    }
}

/// The closed set of configured shifts, keyed by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftSchedule {
    shifts: BTreeMap<String, Shift>,
}

impl Default for ShiftSchedule {
    /// The standard three-shift rotation used when the configuration layer
    /// supplies nothing else.
    fn default() -> Self {
        let mut shifts = BTreeMap::new();
        shifts.insert("morning".to_string(), hhmm_shift(6, 0, 14, 0));
        shifts.insert("afternoon".to_string(), hhmm_shift(14, 0, 22, 0));
        shifts.insert("night".to_string(), hhmm_shift(22, 0, 6, 0));
        Self { shifts }
    }
}

fn hhmm_shift(sh: u32, sm: u32, eh: u32, em: u32) -> Shift {
    // Only called with literal in-range times.
    Shift::new(
        NaiveTime::from_hms_opt(sh, sm, 0).unwrap(),
        NaiveTime::from_hms_opt(eh, em, 0).unwrap(),
    )
}

impl ShiftSchedule {
    pub fn new(shifts: BTreeMap<String, Shift>) -> Self {
        Self { shifts }
    }

    /// Parse the configuration shape `{"night": ["22:00", "06:00"], ...}`.
    ///
    /// Times are `HH:MM` strings. A malformed time string fails the whole
    /// schedule; a shift configured with start > end is kept as-is and
    /// treated as wrapping (validating that only "night" wraps belongs to
    /// the configuration layer).
    pub fn from_json(json: &str) -> Result<Self, AnalyticsError> {
        let raw: BTreeMap<String, [String; 2]> = serde_json::from_str(json)?;

        let mut shifts = BTreeMap::new();
        for (name, [start, end]) in raw {
            let shift = Shift::new(parse_hhmm(&start)?, parse_hhmm(&end)?);
            shifts.insert(name, shift);
        }
        Ok(Self { shifts })
    }

    /// Look up a shift by name. Unknown names are an error, never a default.
    pub fn get(&self, name: &str) -> Result<&Shift, AnalyticsError> {
        self.shifts
            .get(name)
            .ok_or_else(|| AnalyticsError::UnknownShift(name.to_string()))
    }

    /// Configured shift names, ascending
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shifts.keys().map(String::as_str)
    }
}

fn parse_hhmm(s: &str) -> Result<NaiveTime, AnalyticsError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| AnalyticsError::DataSource(format!("invalid shift time '{s}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_plain_shift_membership() {
        let morning = Shift::new(t(6, 0), t(14, 0));
        assert!(!morning.wraps_midnight());
        assert!(morning.contains(t(6, 0)));
        assert!(morning.contains(t(13, 59)));
        assert!(!morning.contains(t(14, 0))); // end-exclusive
        assert!(!morning.contains(t(23, 30)));
    }

    #[test]
    fn test_night_shift_wraps_midnight() {
        let night = Shift::new(t(22, 0), t(6, 0));
        assert!(night.wraps_midnight());
        assert!(night.contains(t(23, 30)));
        assert!(night.contains(t(2, 0)));
        assert!(night.contains(t(22, 0)));
        assert!(!night.contains(t(6, 0)));
        assert!(!night.contains(t(12, 0)));
    }

    #[test]
    fn test_schedule_from_json() {
        let schedule = ShiftSchedule::from_json(
            r#"{"morning": ["06:00", "14:00"], "night": ["22:00", "06:00"]}"#,
        )
        .unwrap();

        assert_eq!(schedule.get("night").unwrap(), &Shift::new(t(22, 0), t(6, 0)));
        assert_eq!(schedule.names().collect::<Vec<_>>(), vec!["morning", "night"]);
    }

    #[test]
    fn test_unknown_shift_is_an_error() {
        let schedule = ShiftSchedule::default();
        let err = schedule.get("graveyard").unwrap_err();
        assert!(matches!(err, AnalyticsError::UnknownShift(name) if name == "graveyard"));
    }

    #[test]
    fn test_malformed_time_fails_the_schedule() {
        let result = ShiftSchedule::from_json(r#"{"morning": ["6am", "14:00"]}"#);
        assert!(matches!(result, Err(AnalyticsError::DataSource(_))));
    }
}
