// src/absence.rs

use tracing::{debug, info};

use crate::attendance::AttendanceUser;
use crate::reporting::{CareStatus, DailyCareRecord};

/// Decides whether a user's absence qualifies for the absence-support
/// add-on.
///
/// Both contacts are mandatory: a morning contact when the absence was
/// reported and an evening condition check. Missing either disqualifies
/// regardless of the claim count. On top of that the user must still be
/// strictly under the monthly ceiling: a user already at the limit is
/// ineligible even with both contacts confirmed.
pub fn compute_absence_eligibility(
    user: &AttendanceUser,
    morning_contacted: bool,
    evening_checked: bool,
    monthly_limit: i32,
) -> bool {
    if !morning_contacted || !evening_checked {
        debug!(
            "Absence add-on for {} not claimable: morning {}, evening {}",
            user.user_code, morning_contacted, evening_checked
        );
        return false;
    }
    user.absence_claimed_this_month < monthly_limit
}

/// Re-applies the facility-wide monthly ceiling on absence-support claims
/// over a user's month of daily records.
///
/// The walk preserves the given (chronological) order, so the first `limit`
/// claims win and later ones are demoted and disabled. Absent days without
/// a claim stay unclaimed and are disabled once the cap is exhausted, so
/// the UI stops offering the toggle. Non-absent days can never carry the
/// add-on and are always forced off. `limit <= 0` demotes everything.
///
/// Always re-run over the full month after any mutation; the result is a
/// fixed point, so repeated runs are harmless.
pub fn enforce_absence_support_limit(
    records: &[DailyCareRecord],
    limit: i32,
) -> Vec<DailyCareRecord> {
    let mut applied_count: i32 = 0;

    records
        .iter()
        .map(|record| {
            let mut updated = record.clone();
            if updated.status != CareStatus::Absent {
                updated.is_absence_support_applied = false;
                updated.absence_support_disabled = true;
            } else if updated.is_absence_support_applied && applied_count < limit {
                applied_count += 1;
                updated.absence_support_disabled = false;
            } else if updated.is_absence_support_applied {
                info!(
                    "Absence support on {} demoted: monthly limit {} reached",
                    updated.date, limit
                );
                updated.is_absence_support_applied = false;
                updated.absence_support_disabled = true;
            } else {
                updated.absence_support_disabled = applied_count >= limit;
            }
            updated
        })
        .collect()
}
