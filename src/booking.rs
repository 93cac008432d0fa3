// src/booking.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::time_range::TimeRange;

/// A calendar entry attached to a schedulable resource (a staff member or a
/// vehicle).
///
/// `resource_id`, `start` and `end` are optional because the list store can
/// hand back rows with absent or garbled fields; the engine degrades on such
/// rows instead of failing. Reassigning a booking to another resource row
/// swaps `resource_id` atomically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceBooking {
    pub id: String,
    pub resource_id: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    /// Informational marker (e.g. a prior overload warning); excluded from
    /// conflict and workload math.
    #[serde(default)]
    pub is_background: bool,
    /// Set once service actuals are recorded against the booking; it is then
    /// an immutable historical record and can no longer be moved.
    #[serde(default)]
    pub has_actuals: bool,
}

impl ResourceBooking {
    /// The booked span, when both timestamps are present.
    pub fn range(&self) -> Option<TimeRange> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(TimeRange::new(start, end)),
            _ => None,
        }
    }
}

/// Why a placement was refused. Surfaced to the UI as display text; never
/// raised as a panic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementRejection {
    #[error("start must precede end")]
    StartNotBeforeEnd,

    #[error("booking with recorded actuals cannot be moved")]
    ActualizedBooking,

    #[error("no resource")]
    NoResource,

    #[error("duplicate time range for this resource")]
    DuplicateTimeRange,
}

/// Boundary DTO for the scheduling UI: `{ allowed, reason? }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementDecision {
    pub allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<Result<(), PlacementRejection>> for PlacementDecision {
    fn from(result: Result<(), PlacementRejection>) -> Self {
        match result {
            Ok(()) => PlacementDecision {
                allowed: true,
                reason: None,
            },
            Err(rejection) => PlacementDecision {
                allowed: false,
                reason: Some(rejection.to_string()),
            },
        }
    }
}

/// A drag/resize proposal for an existing booking: the new span, plus the
/// drop-target resource when the drag crossed resource rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedPlacement {
    pub range: TimeRange,
    /// Explicit drop target; takes precedence over the booking's current
    /// resource.
    pub resource_id: Option<String>,
}

/// Decides whether moving/resizing `candidate` to `proposed` is allowed.
///
/// Checks run in order: a valid span, no recorded actuals, a resolvable
/// resource, and finally the half-open overlap scan against every live
/// booking on that resource. The first conflicting booking is a hard block.
pub fn check_drop_allowed(
    candidate: &ResourceBooking,
    proposed: &ProposedPlacement,
    all_bookings: &[ResourceBooking],
) -> Result<(), PlacementRejection> {
    if proposed.range.is_inverted() {
        return Err(PlacementRejection::StartNotBeforeEnd);
    }
    if candidate.has_actuals {
        debug!("Refusing to move booking {}: actuals recorded", candidate.id);
        return Err(PlacementRejection::ActualizedBooking);
    }
    let resource_id = proposed
        .resource_id
        .as_deref()
        .or(candidate.resource_id.as_deref())
        .ok_or(PlacementRejection::NoResource)?;

    find_conflict(Some(candidate.id.as_str()), resource_id, &proposed.range, all_bookings)
}

/// Decides whether creating a brand-new booking over `range` on
/// `resource_id` is allowed. Same rules as [`check_drop_allowed`] minus the
/// moved-booking identity exclusion.
pub fn check_select_allowed(
    resource_id: Option<&str>,
    range: &TimeRange,
    all_bookings: &[ResourceBooking],
) -> Result<(), PlacementRejection> {
    if range.is_inverted() {
        return Err(PlacementRejection::StartNotBeforeEnd);
    }
    let resource_id = resource_id.ok_or(PlacementRejection::NoResource)?;

    find_conflict(None, resource_id, range, all_bookings)
}

fn find_conflict(
    moving_id: Option<&str>,
    resource_id: &str,
    range: &TimeRange,
    all_bookings: &[ResourceBooking],
) -> Result<(), PlacementRejection> {
    for other in all_bookings {
        if other.is_background {
            continue;
        }
        if moving_id == Some(other.id.as_str()) {
            continue;
        }
        if other.resource_id.as_deref() != Some(resource_id) {
            continue;
        }
        let other_range = match other.range() {
            Some(r) => r,
            None => continue,
        };
        if range.overlaps(&other_range) {
            debug!(
                "Placement on {} conflicts with existing booking {}",
                resource_id, other.id
            );
            return Err(PlacementRejection::DuplicateTimeRange);
        }
    }
    Ok(())
}
