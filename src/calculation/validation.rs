//! Daily record validation.
//!
//! Records are checked before any batch computation. Every failing field is
//! reported with the record's position and date so that an aborted batch
//! names exactly which days were refused.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::models::{DailyRecord, RecordRejection};

fn non_negative(
    index: usize,
    record: &DailyRecord,
    field: &str,
    value: Decimal,
    rejections: &mut Vec<RecordRejection>,
) {
    if value < Decimal::ZERO {
        rejections.push(RecordRejection {
            index,
            date: record.date,
            field: field.to_string(),
            message: format!("must be non-negative, got {}", value.normalize()),
        });
    }
}

/// Validates a single record in isolation.
///
/// Checks that demand, wage rates, recorded costs and recorded overtime are
/// non-negative. Attendance is unsigned and needs no check.
pub fn validate_record(index: usize, record: &DailyRecord) -> Vec<RecordRejection> {
    let mut rejections = Vec::new();
    non_negative(index, record, "incoming_orders", record.incoming_orders, &mut rejections);
    non_negative(
        index,
        record,
        "regular_wage_per_hour",
        record.regular_wage_per_hour,
        &mut rejections,
    );
    non_negative(
        index,
        record,
        "overtime_wage_per_hour",
        record.overtime_wage_per_hour,
        &mut rejections,
    );
    non_negative(index, record, "regular_cost", record.regular_cost, &mut rejections);
    non_negative(index, record, "overtime_cost", record.overtime_cost, &mut rejections);
    non_negative(index, record, "total_labor_cost", record.total_labor_cost, &mut rejections);
    non_negative(index, record, "overtime_hours", record.overtime_hours, &mut rejections);
    rejections
}

/// Validates a batch of records.
///
/// In addition to the per-record checks, dates must be unique: the first
/// occurrence of a date is kept and every later one is rejected.
///
/// # Examples
///
/// ```
/// use workforce_engine::calculation::validate_records;
/// use workforce_engine::models::DailyRecord;
/// use rust_decimal::Decimal;
/// use chrono::NaiveDate;
///
/// let record = DailyRecord {
///     date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
///     incoming_orders: Decimal::from(-10),
///     actual_attendance: 5,
///     regular_wage_per_hour: Decimal::from(20),
///     overtime_wage_per_hour: Decimal::from(30),
///     regular_cost: Decimal::from(800),
///     overtime_cost: Decimal::ZERO,
///     total_labor_cost: Decimal::from(800),
///     overtime_hours: Decimal::ZERO,
/// };
///
/// let rejections = validate_records(&[record]);
/// assert_eq!(rejections.len(), 1);
/// assert_eq!(rejections[0].field, "incoming_orders");
/// ```
pub fn validate_records(records: &[DailyRecord]) -> Vec<RecordRejection> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut rejections = Vec::new();

    for (index, record) in records.iter().enumerate() {
        rejections.extend(validate_record(index, record));
        if !seen.insert(record.date) {
            rejections.push(RecordRejection {
                index,
                date: record.date,
                field: "date".to_string(),
                message: "duplicate date".to_string(),
            });
        }
    }

    rejections
}

/// Returns the indices of records that have at least one rejection.
pub fn rejected_indices(rejections: &[RecordRejection]) -> HashSet<usize> {
    rejections.iter().map(|r| r.index).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(day: u32, orders: i64) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            incoming_orders: Decimal::from(orders),
            actual_attendance: 5,
            regular_wage_per_hour: Decimal::from(20),
            overtime_wage_per_hour: Decimal::from(30),
            regular_cost: Decimal::from(800),
            overtime_cost: Decimal::from(200),
            total_labor_cost: Decimal::from(1000),
            overtime_hours: Decimal::from(5),
        }
    }

    #[test]
    fn test_valid_batch_has_no_rejections() {
        let records = vec![record(1, 100), record(2, 0), record(3, 500)];
        assert!(validate_records(&records).is_empty());
    }

    // ==========================================================================
    // Scenario E: negative demand is rejected with its date
    // ==========================================================================
    #[test]
    fn test_negative_orders_rejected_with_date() {
        let records = vec![record(1, 100), record(3, -10)];

        let rejections = validate_records(&records);

        assert_eq!(rejections.len(), 1);
        assert_eq!(rejections[0].index, 1);
        assert_eq!(rejections[0].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(rejections[0].field, "incoming_orders");
        assert_eq!(rejections[0].message, "must be non-negative, got -10");
    }

    #[test]
    fn test_every_negative_field_is_reported() {
        let mut bad = record(4, 100);
        bad.regular_wage_per_hour = Decimal::from(-1);
        bad.overtime_hours = Decimal::new(-5, 1);

        let rejections = validate_record(0, &bad);
        let fields: Vec<&str> = rejections.iter().map(|r| r.field.as_str()).collect();

        assert_eq!(fields, vec!["regular_wage_per_hour", "overtime_hours"]);
    }

    #[test]
    fn test_duplicate_date_rejects_later_occurrence() {
        let records = vec![record(1, 100), record(2, 200), record(1, 300)];

        let rejections = validate_records(&records);

        assert_eq!(rejections.len(), 1);
        assert_eq!(rejections[0].index, 2);
        assert_eq!(rejections[0].field, "date");
    }

    #[test]
    fn test_rejected_indices_deduplicates() {
        let mut bad = record(1, -1);
        bad.overtime_cost = Decimal::from(-3);
        let rejections = validate_records(&[bad, record(2, 10)]);

        assert_eq!(rejections.len(), 2);
        let indices = rejected_indices(&rejections);
        assert_eq!(indices.len(), 1);
        assert!(indices.contains(&0));
    }
}
