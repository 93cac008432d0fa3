// src/lib.rs

//! Scheduling and attendance-compliance rules for a disability day-care
//! facility.
//!
//! The crate covers the five rule areas the facility's administrative
//! application leans on: booking conflict checks for shared resources
//! (staff, vehicles), per-resource workload aggregation with overload
//! warnings, the daily attendance state machine (check-in / check-out /
//! absence), absence-support add-on eligibility under a monthly cap, and
//! service-minute discrepancy reporting with monthly roll-ups.
//!
//! Every function is pure: the caller hands in an immutable snapshot of
//! records (and the current time, where a rule needs it) and receives a
//! derived value or a new snapshot back. Persistence, UI, and clock reads
//! belong to the host application; the engine never performs I/O and never
//! panics on malformed caller data; bad input degrades to a zero or a
//! conservative refusal.

pub mod absence;
pub mod attendance;
pub mod booking;
pub mod config;
pub mod reporting;
pub mod time_range;
pub mod workload;

#[cfg(test)]
mod workload_tests;

pub use absence::{compute_absence_eligibility, enforce_absence_support_limit};
pub use attendance::{
    build_absent_visit, build_initial_visits, can_check_in, can_check_out, check_in, check_out,
    confirm_visit, is_before_close_time, AbsenceDetails, AttendanceUser, AttendanceVisit,
    VisitStatus,
};
pub use booking::{
    check_drop_allowed, check_select_allowed, PlacementDecision, PlacementRejection,
    ProposedPlacement, ResourceBooking,
};
pub use config::FacilityConfig;
pub use reporting::{
    calculate_hours, compute_monthly_summary, discrepancy_count, CareStatus, DailyCareRecord,
    MonthlySummary, TransportationAddon,
};
pub use time_range::{diff_minutes, TimeRange};
pub use workload::{aggregate_workload, generate_warnings, ResourceWorkloadTotal, WarningEvent};
