// src/attendance.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::time_range::diff_minutes;

/// Progress of one user's day through the attendance flow.
///
/// `Unvisited → CheckedIn → CheckedOut`, with `Unvisited → Absent` as the
/// alternate branch. `CheckedOut` and `Absent` are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitStatus {
    #[default]
    Unvisited,
    CheckedIn,
    CheckedOut,
    Absent,
}

/// One user's attendance row for a single service day.
///
/// Created at day start for every active user, mutated by the
/// check-in / check-out / absence actions, never deleted. It is the
/// historical record the monthly reports are built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceVisit {
    pub user_code: String,
    pub date: NaiveDate,
    pub status: VisitStatus,
    /// 0 or 1; guards a double check-in.
    pub cnt_attend_in: u8,
    /// 0 or 1; guards a double check-out. 1 implies `status == CheckedOut`.
    pub cnt_attend_out: u8,
    pub check_in_at: Option<DateTime<Utc>>,
    pub check_out_at: Option<DateTime<Utc>>,
    /// Pickup add-on flag.
    pub transport_to: bool,
    /// Dropoff add-on flag.
    pub transport_from: bool,
    pub absent_morning_contacted: bool,
    pub absent_morning_method: Option<String>,
    pub evening_checked: bool,
    pub evening_note: Option<String>,
    pub is_absence_addon_claimable: bool,
    /// Actual minutes of service; stays 0 until check-out.
    pub provided_minutes: i64,
    pub user_confirmed_at: Option<DateTime<Utc>>,
}

/// Facility roster entry, read-only to the engine. The caller maintains the
/// monthly claim count; the engine only compares against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceUser {
    pub user_code: String,
    pub is_transport_target: bool,
    pub absence_claimed_this_month: i32,
    /// Contracted daily service length in minutes.
    pub standard_minutes: i64,
}

/// What the absence dialog captured for one user-day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbsenceDetails {
    pub morning_contacted: bool,
    pub morning_method: Option<String>,
    pub evening_checked: bool,
    pub evening_note: Option<String>,
    /// Outcome of the eligibility evaluation, carried onto the visit.
    pub eligible: bool,
}

/// Day-start snapshot: one `Unvisited` row per active user.
///
/// Transport flags are seeded from the roster: a transport-target user is
/// planned for pickup and dropoff until the day says otherwise.
pub fn build_initial_visits(users: &[AttendanceUser], date: NaiveDate) -> Vec<AttendanceVisit> {
    users
        .iter()
        .map(|user| AttendanceVisit {
            user_code: user.user_code.clone(),
            date,
            status: VisitStatus::Unvisited,
            cnt_attend_in: 0,
            cnt_attend_out: 0,
            check_in_at: None,
            check_out_at: None,
            transport_to: user.is_transport_target,
            transport_from: user.is_transport_target,
            absent_morning_contacted: false,
            absent_morning_method: None,
            evening_checked: false,
            evening_note: None,
            is_absence_addon_claimable: false,
            provided_minutes: 0,
            user_confirmed_at: None,
        })
        .collect()
}

pub fn can_check_in(visit: &AttendanceVisit) -> bool {
    visit.status == VisitStatus::Unvisited && visit.cnt_attend_in == 0
}

/// True iff the visit exists, is checked in, and has not checked out yet.
/// Any other state, including a missing visit, is a plain `false`, never
/// an error; the UI disables the action instead of handling exceptions.
pub fn can_check_out(visit: Option<&AttendanceVisit>) -> bool {
    match visit {
        Some(visit) => visit.status == VisitStatus::CheckedIn && visit.cnt_attend_out == 0,
        None => false,
    }
}

/// Records arrival. An illegal transition returns the visit unchanged.
pub fn check_in(visit: &AttendanceVisit, at: DateTime<Utc>) -> AttendanceVisit {
    if !can_check_in(visit) {
        debug!(
            "Check-in refused for {} on {}: status {:?}, cntAttendIn {}",
            visit.user_code, visit.date, visit.status, visit.cnt_attend_in
        );
        return visit.clone();
    }
    let mut updated = visit.clone();
    updated.status = VisitStatus::CheckedIn;
    updated.cnt_attend_in = 1;
    updated.check_in_at = Some(at);
    updated
}

/// Records departure and derives the provided service minutes from the
/// check-in/check-out pair. An illegal transition returns the visit
/// unchanged.
pub fn check_out(visit: &AttendanceVisit, at: DateTime<Utc>) -> AttendanceVisit {
    if !can_check_out(Some(visit)) {
        debug!(
            "Check-out refused for {} on {}: status {:?}, cntAttendOut {}",
            visit.user_code, visit.date, visit.status, visit.cnt_attend_out
        );
        return visit.clone();
    }
    let mut updated = visit.clone();
    updated.status = VisitStatus::CheckedOut;
    updated.cnt_attend_out = 1;
    updated.check_out_at = Some(at);
    updated.provided_minutes = diff_minutes(updated.check_in_at, Some(at));
    updated
}

/// Stamps the user's confirmation on a completed visit. No-op unless the
/// visit is checked out.
pub fn confirm_visit(visit: &AttendanceVisit, at: DateTime<Utc>) -> AttendanceVisit {
    if visit.status != VisitStatus::CheckedOut {
        debug!(
            "Confirmation refused for {} on {}: status {:?}",
            visit.user_code, visit.date, visit.status
        );
        return visit.clone();
    }
    let mut updated = visit.clone();
    updated.user_confirmed_at = Some(at);
    updated
}

/// Rewrites a visit into the terminal `Absent` state.
///
/// Everything a live visit accumulates is scrubbed: check-in/out counters
/// and instants, transport flags, the confirmation timestamp, and the
/// provided minutes. The add-on claimability comes from the eligibility
/// evaluation the caller ran beforehand.
pub fn build_absent_visit(base: &AttendanceVisit, details: &AbsenceDetails) -> AttendanceVisit {
    AttendanceVisit {
        user_code: base.user_code.clone(),
        date: base.date,
        status: VisitStatus::Absent,
        cnt_attend_in: 0,
        cnt_attend_out: 0,
        check_in_at: None,
        check_out_at: None,
        transport_to: false,
        transport_from: false,
        absent_morning_contacted: details.morning_contacted,
        absent_morning_method: details.morning_method.clone(),
        evening_checked: details.evening_checked,
        evening_note: details.evening_note.clone(),
        is_absence_addon_claimable: details.eligible,
        provided_minutes: 0,
        user_confirmed_at: None,
    }
}

/// Strict wall-clock comparison against the facility closing time: gates
/// whether a check-out/absence action is still permitted for "today".
///
/// An unparseable close time yields `false`: the conservative answer is
/// that the facility is closed.
pub fn is_before_close_time(now: NaiveDateTime, close_hhmm: &str) -> bool {
    match NaiveTime::parse_from_str(close_hhmm.trim(), "%H:%M") {
        Ok(close) => now.time() < close,
        Err(_) => {
            warn!("Unparseable close time '{}'; treating as closed", close_hhmm);
            false
        }
    }
}
