// src/workload_tests.rs

#[cfg(test)]
mod tests {
    use crate::booking::ResourceBooking;
    use crate::workload::*;
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn ts(datetime_str: &str) -> DateTime<Utc> {
        let naive = NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%d %H:%M:%S")
            .unwrap_or_else(|_| panic!("Invalid datetime string: {}", datetime_str));
        Utc.from_utc_datetime(&naive)
    }

    fn booking(id: &str, resource: &str, start: &str, end: &str) -> ResourceBooking {
        ResourceBooking {
            id: id.to_string(),
            resource_id: Some(resource.to_string()),
            start: Some(ts(start)),
            end: Some(ts(end)),
            is_background: false,
            has_actuals: false,
        }
    }

    #[test]
    fn sums_hours_per_resource() {
        let bookings = vec![
            booking("b1", "staff-1", "2025-04-01 09:00:00", "2025-04-01 13:00:00"),
            booking("b2", "staff-1", "2025-04-01 14:00:00", "2025-04-01 19:00:00"),
            booking("b3", "staff-2", "2025-04-01 09:00:00", "2025-04-01 12:00:00"),
        ];

        let totals = aggregate_workload(&bookings, dec!(8));

        let staff_1 = &totals["staff-1"];
        assert_eq!(staff_1.total_hours, dec!(9.0));
        assert!(staff_1.is_over);

        let staff_2 = &totals["staff-2"];
        assert_eq!(staff_2.total_hours, dec!(3.0));
        assert!(!staff_2.is_over);
    }

    #[test]
    fn rounding_happens_before_limit_comparison() {
        // 8h02m = 8.033... rounds to 8.0 -> not over a limit of 8.
        let under = vec![booking("b1", "staff-1", "2025-04-01 09:00:00", "2025-04-01 17:02:00")];
        let totals = aggregate_workload(&under, dec!(8));
        assert_eq!(totals["staff-1"].total_hours, dec!(8.0));
        assert!(!totals["staff-1"].is_over);

        // 8h03m = 8.05 rounds away from zero to 8.1 -> over.
        let over = vec![booking("b1", "staff-1", "2025-04-01 09:00:00", "2025-04-01 17:03:00")];
        let totals = aggregate_workload(&over, dec!(8));
        assert_eq!(totals["staff-1"].total_hours, dec!(8.1));
        assert!(totals["staff-1"].is_over);
    }

    #[test]
    fn exactly_at_limit_is_not_over() {
        let bookings = vec![booking("b1", "staff-1", "2025-04-01 09:00:00", "2025-04-01 17:00:00")];
        let totals = aggregate_workload(&bookings, dec!(8));
        assert_eq!(totals["staff-1"].total_hours, dec!(8.0));
        assert!(!totals["staff-1"].is_over, "comparison is strictly greater-than");
    }

    #[test]
    fn negative_duration_clamps_to_zero() {
        let bookings = vec![
            // Garbled row: end precedes start.
            booking("b1", "staff-1", "2025-04-01 15:00:00", "2025-04-01 09:00:00"),
            booking("b2", "staff-1", "2025-04-01 09:00:00", "2025-04-01 11:00:00"),
        ];

        let totals = aggregate_workload(&bookings, dec!(8));
        assert_eq!(totals["staff-1"].total_hours, dec!(2.0));
    }

    #[test]
    fn background_markers_do_not_count() {
        let mut marker = booking("warn-1", "staff-1", "2025-04-01 00:00:00", "2025-04-02 00:00:00");
        marker.is_background = true;
        let bookings = vec![
            marker,
            booking("b1", "staff-1", "2025-04-01 09:00:00", "2025-04-01 11:00:00"),
        ];

        let totals = aggregate_workload(&bookings, dec!(8));
        assert_eq!(totals["staff-1"].total_hours, dec!(2.0));
    }

    #[test]
    fn rows_without_any_timestamp_are_filtered() {
        let mut empty = booking("b1", "staff-1", "2025-04-01 09:00:00", "2025-04-01 10:00:00");
        empty.start = None;
        empty.end = None;

        let totals = aggregate_workload(&[empty], dec!(8));
        assert!(!totals.contains_key("staff-1"));
    }

    #[test]
    fn row_with_single_timestamp_contributes_zero() {
        let mut partial = booking("b1", "staff-1", "2025-04-01 09:00:00", "2025-04-01 10:00:00");
        partial.end = None;

        let totals = aggregate_workload(&[partial], dec!(8));
        assert_eq!(totals["staff-1"].total_hours, dec!(0));
        assert!(!totals["staff-1"].is_over);
    }

    #[test]
    fn generates_one_warning_per_overloaded_resource() {
        let bookings = vec![
            booking("b1", "staff-1", "2025-04-01 08:00:00", "2025-04-01 17:00:00"),
            booking("b2", "staff-2", "2025-04-01 09:00:00", "2025-04-01 12:00:00"),
        ];
        let totals = aggregate_workload(&bookings, dec!(8));

        let window_start = ts("2025-04-01 00:00:00");
        let window_end = ts("2025-04-01 00:00:00");
        let warnings = generate_warnings(&totals, window_start, window_end);

        assert_eq!(warnings.len(), 1);
        let warning = &warnings[0];
        assert_eq!(warning.resource_id, "staff-1");
        assert_eq!(
            warning.id,
            format!("warning-staff-1-{}", window_start.timestamp_millis())
        );
        assert!(warning.title.contains("9.0h"), "title embeds the rounded total: {}", warning.title);
        assert!(warning.is_background);
        assert_eq!(warning.start, window_start);
        assert_eq!(warning.end, ts("2025-04-02 00:00:00"), "all-day span runs to window end + 1 day");
    }

    #[test]
    fn warning_generation_is_idempotent() {
        let bookings = vec![booking("b1", "staff-1", "2025-04-01 08:00:00", "2025-04-01 17:30:00")];
        let totals = aggregate_workload(&bookings, dec!(8));

        let window_start = ts("2025-04-01 00:00:00");
        let window_end = ts("2025-04-01 00:00:00");
        let first = generate_warnings(&totals, window_start, window_end);
        let second = generate_warnings(&totals, window_start, window_end);

        assert_eq!(first, second, "same inputs must reproduce the same ids");
    }

    #[test]
    fn under_limit_resources_produce_no_warnings() {
        let bookings = vec![booking("b1", "staff-1", "2025-04-01 09:00:00", "2025-04-01 12:00:00")];
        let totals = aggregate_workload(&bookings, dec!(8));

        let warnings = generate_warnings(&totals, ts("2025-04-01 00:00:00"), ts("2025-04-01 00:00:00"));
        assert!(warnings.is_empty());
    }
}
