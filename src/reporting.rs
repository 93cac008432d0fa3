// src/reporting.rs

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::attendance::{AttendanceUser, AttendanceVisit};
use crate::time_range::minutes_of_day;

/// How a care day was provided, as kept by the monthly reporting view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CareStatus {
    Present,
    Absent,
    Online,
    /// Unrecognized store value. Deserializes instead of erroring and is
    /// skipped by the status tallies.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportationAddon {
    pub outbound: bool,
    pub inbound: bool,
}

/// One calendar day of a user's service month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCareRecord {
    pub date: NaiveDate,
    pub status: CareStatus,
    /// Wall-clock `HH:MM`; tolerated garbled, see [`calculate_hours`].
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(default)]
    pub transportation_addon: TransportationAddon,
    #[serde(default)]
    pub meal_addon: bool,
    #[serde(default)]
    pub bathing_addon: bool,
    /// Open-ended add-on map; an entry counts toward the summary only when
    /// its value is truthy.
    #[serde(default)]
    pub other_addons: HashMap<String, Value>,
    #[serde(default)]
    pub is_absence_support_applied: bool,
    /// Maintained by the cap enforcer; when set, the UI must not offer the
    /// absence-support toggle.
    #[serde(default)]
    pub absence_support_disabled: bool,
    #[serde(default)]
    pub calculated_hours: Decimal,
}

/// Pure fold of a month of daily records: day counts per status, add-on
/// counts, and the absence-support count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub present_days: u32,
    pub absent_days: u32,
    pub online_days: u32,
    pub transport_outbound_count: u32,
    pub transport_inbound_count: u32,
    pub meal_addon_count: u32,
    pub bathing_addon_count: u32,
    pub other_addon_counts: BTreeMap<String, u32>,
    pub absence_support_count: u32,
}

/// Counts visits whose provided minutes fall materially short of the user's
/// contracted minutes.
///
/// A visit is a discrepancy iff `provided_minutes` is strictly below
/// `standard_minutes × threshold`; landing exactly on the boundary is fine.
/// Visits with zero provided minutes (usually "not yet checked out") and
/// visits for users missing from the roster are silently excluded; neither
/// is evidence of under-delivery.
pub fn discrepancy_count(
    visits: &[AttendanceVisit],
    users: &[AttendanceUser],
    threshold: Decimal,
) -> usize {
    let roster: HashMap<&str, &AttendanceUser> = users
        .iter()
        .map(|user| (user.user_code.as_str(), user))
        .collect();

    visits
        .iter()
        .filter(|visit| {
            if visit.provided_minutes <= 0 {
                return false;
            }
            let user = match roster.get(visit.user_code.as_str()) {
                Some(user) => user,
                None => return false,
            };
            let floor = Decimal::from(user.standard_minutes) * threshold;
            let short = Decimal::from(visit.provided_minutes) < floor;
            if short {
                debug!(
                    "Provided minutes for {} on {} below contract: {} < {}",
                    visit.user_code, visit.date, visit.provided_minutes, floor
                );
            }
            short
        })
        .count()
}

/// Single deterministic fold over a month of records. Unknown statuses are
/// skipped by the status tallies but never error; open add-on entries count
/// only when truthy.
pub fn compute_monthly_summary(records: &[DailyCareRecord]) -> MonthlySummary {
    let mut summary = MonthlySummary::default();

    for record in records {
        match record.status {
            CareStatus::Present => summary.present_days += 1,
            CareStatus::Absent => summary.absent_days += 1,
            CareStatus::Online => summary.online_days += 1,
            CareStatus::Unknown => {}
        }
        if record.transportation_addon.outbound {
            summary.transport_outbound_count += 1;
        }
        if record.transportation_addon.inbound {
            summary.transport_inbound_count += 1;
        }
        if record.meal_addon {
            summary.meal_addon_count += 1;
        }
        if record.bathing_addon {
            summary.bathing_addon_count += 1;
        }
        for (key, value) in &record.other_addons {
            if is_truthy(value) {
                *summary.other_addon_counts.entry(key.clone()).or_insert(0) += 1;
            }
        }
        if record.is_absence_support_applied {
            summary.absence_support_count += 1;
        }
    }

    summary
}

/// Service hours for one record: 0 for an absent day, otherwise the
/// `HH:MM`-to-`HH:MM` span in hours rounded to two decimal places. Garbled
/// or inverted times yield 0, never an error.
pub fn calculate_hours(status: CareStatus, start_time: Option<&str>, end_time: Option<&str>) -> Decimal {
    if status == CareStatus::Absent {
        return Decimal::ZERO;
    }
    let start = match start_time.and_then(minutes_of_day) {
        Some(minutes) => minutes,
        None => return Decimal::ZERO,
    };
    let end = match end_time.and_then(minutes_of_day) {
        Some(minutes) => minutes,
        None => return Decimal::ZERO,
    };
    if end <= start {
        return Decimal::ZERO;
    }
    (Decimal::from(end - start) / dec!(60))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// JS-style truthiness for the open add-on map: `false`, `null`, `0` and
/// `""` do not count.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
