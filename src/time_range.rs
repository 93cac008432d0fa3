// src/time_range.rs

use chrono::{DateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Half-open time interval `[start, end)`.
///
/// Shared by the conflict checker and the workload aggregator. An interval
/// ending at the instant another starts does not overlap it, so back-to-back
/// bookings are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// An inverted or empty range (`start >= end`) is never a valid booking
    /// span.
    pub fn is_inverted(&self) -> bool {
        self.start >= self.end
    }

    /// `[s1,e1)` and `[s2,e2)` overlap iff `s1 < e2 && s2 < e1`.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Span length in whole seconds; a malformed (inverted) range counts as
    /// zero rather than subtracting.
    pub fn duration_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds().max(0)
    }

    /// Span length in whole minutes, truncated; never negative.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes().max(0)
    }
}

/// Whole minutes between two optional instants, truncated toward zero.
///
/// Returns 0 when either side is missing or when `end <= start`; a partial
/// or garbled pair of timestamps is never evidence of negative time.
pub fn diff_minutes(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> i64 {
    match (start, end) {
        (Some(start), Some(end)) if end > start => (end - start).num_minutes(),
        _ => 0,
    }
}

/// Parses an `HH:MM` wall-clock string into minutes of day.
///
/// `None` for anything unparseable; callers treat that as "no time", not as
/// an error.
pub fn minutes_of_day(hhmm: &str) -> Option<i64> {
    NaiveTime::parse_from_str(hhmm.trim(), "%H:%M")
        .ok()
        .map(|t| i64::from(t.hour()) * 60 + i64::from(t.minute()))
}
