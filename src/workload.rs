// src/workload.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::booking::ResourceBooking;

/// Booked-hours total for one resource over an aggregation window.
///
/// Derived, never persisted: the caller recomputes the full map on every
/// booking-set change rather than patching totals incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceWorkloadTotal {
    pub resource_id: String,
    /// Hours, rounded to one decimal place.
    pub total_hours: Decimal,
    /// Strictly above the configured limit, after rounding.
    pub is_over: bool,
}

/// Synthetic booking-shaped overload marker, consumable by a calendar
/// renderer. Always a background entry, so feeding it back into the conflict
/// checker or the aggregator changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningEvent {
    pub id: String,
    pub resource_id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub is_background: bool,
}

/// Sums booked duration per resource and flags totals strictly above
/// `limit_hours`.
///
/// Background markers and rows with no timestamps at all are skipped; a row
/// with a single garbled timestamp still names its resource but contributes
/// zero. The total is rounded to one decimal place before the limit
/// comparison.
pub fn aggregate_workload(
    bookings: &[ResourceBooking],
    limit_hours: Decimal,
) -> BTreeMap<String, ResourceWorkloadTotal> {
    let mut seconds_per_resource: BTreeMap<String, i64> = BTreeMap::new();

    for booking in bookings {
        if booking.is_background {
            continue;
        }
        if booking.start.is_none() && booking.end.is_none() {
            continue;
        }
        let resource_id = match booking.resource_id.as_deref() {
            Some(id) => id,
            None => continue,
        };
        let seconds = match booking.range() {
            Some(range) => {
                if range.is_inverted() {
                    warn!(
                        "Booking {} on {} ends before it starts; counting zero",
                        booking.id, resource_id
                    );
                }
                range.duration_seconds()
            }
            None => {
                warn!(
                    "Booking {} on {} is missing a timestamp; counting zero",
                    booking.id, resource_id
                );
                0
            }
        };
        *seconds_per_resource.entry(resource_id.to_string()).or_insert(0) += seconds;
    }

    seconds_per_resource
        .into_iter()
        .map(|(resource_id, seconds)| {
            let total_hours = (Decimal::from(seconds) / dec!(3600))
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
            let total = ResourceWorkloadTotal {
                resource_id: resource_id.clone(),
                total_hours,
                is_over: total_hours > limit_hours,
            };
            (resource_id, total)
        })
        .collect()
}

/// Synthesizes one all-day overload marker per over-limit resource, spanning
/// `[window_start, window_end + 1 day)`.
///
/// Ids are derived from the resource and the window start, so re-running the
/// generator against the same window reproduces the same ids instead of
/// piling up duplicates.
pub fn generate_warnings(
    totals: &BTreeMap<String, ResourceWorkloadTotal>,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<WarningEvent> {
    totals
        .values()
        .filter(|total| total.is_over)
        .map(|total| {
            info!(
                "Overload warning for {}: {:.1}h booked",
                total.resource_id, total.total_hours
            );
            WarningEvent {
                id: format!(
                    "warning-{}-{}",
                    total.resource_id,
                    window_start.timestamp_millis()
                ),
                resource_id: total.resource_id.clone(),
                title: format!("Overloaded: {:.1}h booked", total.total_hours),
                start: window_start,
                end: window_end + Duration::days(1),
                is_background: true,
            }
        })
        .collect()
}
