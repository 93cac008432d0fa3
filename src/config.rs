// src/config.rs

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Facility-level rule parameters.
///
/// The engine itself never reads these from disk or environment; the host
/// application deserializes them from wherever it keeps settings and passes
/// the individual values into the rule functions. Missing keys fall back to
/// the regulatory defaults below.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FacilityConfig {
    /// Booked-hours ceiling per resource and day; totals strictly above this
    /// raise an overload warning.
    pub workload_limit_hours: Decimal,
    /// Monthly ceiling on absence-support add-on claims per user.
    pub absence_monthly_limit: i32,
    /// Fraction of the contracted minutes below which a provided visit
    /// counts as under-delivered.
    pub discrepancy_threshold: Decimal,
    /// Facility closing time, `HH:MM` wall clock. Check-out and absence
    /// actions for "today" are only permitted strictly before this.
    pub close_time: String,
}

impl FacilityConfig {
    /// Whether a check-out/absence action for "today" is still permitted at
    /// `now`, per the configured closing time.
    pub fn is_open_at(&self, now: NaiveDateTime) -> bool {
        crate::attendance::is_before_close_time(now, &self.close_time)
    }
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            workload_limit_hours: dec!(8),
            absence_monthly_limit: 2,
            discrepancy_threshold: dec!(0.7),
            close_time: "18:00".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_facility_regulations() {
        let config = FacilityConfig::default();
        assert_eq!(config.workload_limit_hours, dec!(8));
        assert_eq!(config.absence_monthly_limit, 2);
        assert_eq!(config.discrepancy_threshold, dec!(0.7));
        assert_eq!(config.close_time, "18:00");
    }

    #[test]
    fn partial_settings_fall_back_to_defaults() {
        let config: FacilityConfig =
            serde_json::from_str(r#"{ "absenceMonthlyLimit": 3 }"#).unwrap();
        assert_eq!(config.absence_monthly_limit, 3);
        assert_eq!(config.workload_limit_hours, dec!(8));
        assert_eq!(config.close_time, "18:00");
    }
}
