//! Regular capacity and workload gap.
//!
//! This module maps a [`DailyRecord`] to the capacity its actually-present
//! workers could supply within regular hours, and compares that to demand.

use rust_decimal::Decimal;

use crate::config::CapacityParameters;
use crate::error::{EngineError, EngineResult};
use crate::models::{DailyRecord, DerivedDailyMetrics, Ratio, UndefinedReason};

/// Output achievable by `attendance` workers within regular hours.
///
/// `attendance × regular_hours_per_worker × productivity_per_hour`
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] if the product overflows.
pub fn regular_capacity(attendance: u32, params: &CapacityParameters) -> EngineResult<Decimal> {
    Decimal::from(attendance)
        .checked_mul(params.regular_hours_per_worker())
        .and_then(|hours| hours.checked_mul(params.productivity_per_hour()))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("regular capacity of {} workers overflows", attendance),
        })
}

/// Computes the derived capacity metrics for one record.
///
/// This is a pure function of the record and parameters; records are
/// processed independently. A day with no incoming orders has an undefined
/// `percentage_fulfilled`.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] naming the record's date if the
/// capacity or the gap overflows.
///
/// # Examples
///
/// ```
/// use workforce_engine::calculation::compute_metrics;
/// use workforce_engine::config::CapacityParameters;
/// use workforce_engine::models::DailyRecord;
/// use rust_decimal::Decimal;
/// use chrono::NaiveDate;
///
/// let record = DailyRecord {
///     date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
///     incoming_orders: Decimal::from(500),
///     actual_attendance: 5,
///     regular_wage_per_hour: Decimal::from(20),
///     overtime_wage_per_hour: Decimal::from(30),
///     regular_cost: Decimal::from(800),
///     overtime_cost: Decimal::from(200),
///     total_labor_cost: Decimal::from(1000),
///     overtime_hours: Decimal::from(6),
/// };
///
/// let metrics = compute_metrics(&record, &CapacityParameters::default()).unwrap();
/// assert_eq!(metrics.regular_capacity, Decimal::from(400));
/// assert_eq!(metrics.workload_gap, Decimal::from(100));
/// assert_eq!(metrics.percentage_fulfilled.as_option(), Some(Decimal::new(8, 1)));
/// ```
pub fn compute_metrics(
    record: &DailyRecord,
    params: &CapacityParameters,
) -> EngineResult<DerivedDailyMetrics> {
    let overflow = |what: &str| EngineError::CalculationError {
        message: format!("{} overflows on {}", what, record.date),
    };

    let regular_capacity = regular_capacity(record.actual_attendance, params)
        .map_err(|_| overflow("regular capacity"))?;
    let workload_gap = record
        .incoming_orders
        .checked_sub(regular_capacity)
        .ok_or_else(|| overflow("workload gap"))?;

    // Capacity at or above demand is fully fulfilled; below it the quotient is under one.
    let percentage_fulfilled = if record.incoming_orders > Decimal::ZERO
        && regular_capacity >= record.incoming_orders
    {
        Ratio::Defined {
            value: Decimal::ONE,
        }
    } else {
        Ratio::of(
            regular_capacity,
            record.incoming_orders,
            UndefinedReason::ZeroIncomingOrders,
        )
    };

    Ok(DerivedDailyMetrics {
        date: record.date,
        incoming_orders: record.incoming_orders,
        regular_capacity,
        workload_gap,
        percentage_fulfilled,
    })
}

/// Computes metrics for every record, preserving input order.
///
/// Stops at the first record whose figures overflow.
pub fn compute_daily_metrics(
    records: &[DailyRecord],
    params: &CapacityParameters,
) -> EngineResult<Vec<DerivedDailyMetrics>> {
    records
        .iter()
        .map(|record| compute_metrics(record, params))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(orders: i64, attendance: u32) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            incoming_orders: Decimal::from(orders),
            actual_attendance: attendance,
            regular_wage_per_hour: Decimal::from(20),
            overtime_wage_per_hour: Decimal::from(30),
            regular_cost: Decimal::from(800),
            overtime_cost: Decimal::from(200),
            total_labor_cost: Decimal::from(1000),
            overtime_hours: Decimal::from(4),
        }
    }

    // ==========================================================================
    // Scenario A: no orders, five workers present
    // ==========================================================================
    #[test]
    fn test_zero_orders_leaves_fulfilment_undefined() {
        let metrics = compute_metrics(&record(0, 5), &CapacityParameters::default()).unwrap();

        assert_eq!(metrics.regular_capacity, Decimal::from(400));
        assert_eq!(metrics.workload_gap, Decimal::from(-400));
        assert_eq!(
            metrics.percentage_fulfilled,
            Ratio::Undefined {
                reason: UndefinedReason::ZeroIncomingOrders
            }
        );
    }

    #[test]
    fn test_fulfilment_is_capped_at_one() {
        let metrics = compute_metrics(&record(200, 5), &CapacityParameters::default()).unwrap();

        assert_eq!(metrics.workload_gap, Decimal::from(-200));
        assert_eq!(metrics.percentage_fulfilled.as_option(), Some(Decimal::ONE));
    }

    #[test]
    fn test_partial_fulfilment() {
        let metrics = compute_metrics(&record(1000, 5), &CapacityParameters::default()).unwrap();

        assert_eq!(metrics.workload_gap, Decimal::from(600));
        assert_eq!(
            metrics.percentage_fulfilled.as_option(),
            Some(Decimal::new(4, 1))
        );
    }

    #[test]
    fn test_no_attendance_means_no_capacity() {
        let metrics = compute_metrics(&record(300, 0), &CapacityParameters::default()).unwrap();

        assert_eq!(metrics.regular_capacity, Decimal::ZERO);
        assert_eq!(metrics.workload_gap, Decimal::from(300));
        assert_eq!(metrics.percentage_fulfilled.as_option(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_regular_capacity_ignores_overtime_parameter() {
        let params =
            CapacityParameters::new(Decimal::from(8), Decimal::from(6), Decimal::from(10)).unwrap();
        assert_eq!(regular_capacity(3, &params).unwrap(), Decimal::from(240));
    }

    #[test]
    fn test_compute_daily_metrics_preserves_order() {
        let mut first = record(100, 1);
        first.date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let mut second = record(200, 2);
        second.date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let metrics =
            compute_daily_metrics(&[first, second], &CapacityParameters::default()).unwrap();

        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(metrics[1].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_capacity_overflow_names_the_day() {
        let params = CapacityParameters::new(
            Decimal::from(10_000_000_000_000_000_000u64),
            Decimal::ONE,
            Decimal::from(10),
        )
        .unwrap();

        match compute_metrics(&record(100, u32::MAX), &params) {
            Err(EngineError::CalculationError { message }) => {
                assert!(message.contains("regular capacity"));
                assert!(message.contains("2024-01-02"));
            }
            other => panic!("Expected CalculationError, got {:?}", other),
        }
        assert!(compute_daily_metrics(&[record(100, u32::MAX)], &params).is_err());
    }

    #[test]
    fn test_tiny_demand_against_large_capacity_is_fully_fulfilled() {
        let mut day = record(0, 5);
        day.incoming_orders = Decimal::new(1, 28);

        let metrics = compute_metrics(&day, &CapacityParameters::default()).unwrap();

        assert_eq!(metrics.percentage_fulfilled.as_option(), Some(Decimal::ONE));
    }
}
