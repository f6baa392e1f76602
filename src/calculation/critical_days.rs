//! Critical overtime day detection.
//!
//! A day is critical when the overtime actually recorded for it exceeds a
//! threshold. This uses `DailyRecord::overtime_hours`, which is unrelated to
//! the per-worker overtime allowance of the capacity model.

use rust_decimal::Decimal;

use crate::models::{CriticalDay, DailyRecord};

/// Default recorded-overtime threshold, in hours.
pub const DEFAULT_CRITICAL_OVERTIME_THRESHOLD: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// Returns true if the record's overtime strictly exceeds `threshold`.
pub fn is_critical_day(record: &DailyRecord, threshold: Decimal) -> bool {
    record.overtime_hours > threshold
}

/// Returns every record whose overtime exceeds `threshold`, in input order.
pub fn critical_days(records: &[DailyRecord], threshold: Decimal) -> Vec<CriticalDay> {
    records
        .iter()
        .filter(|record| is_critical_day(record, threshold))
        .map(|record| CriticalDay {
            date: record.date,
            overtime_hours: record.overtime_hours,
        })
        .collect()
}
