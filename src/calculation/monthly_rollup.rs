//! Monthly labor cost rollup.
//!
//! Groups records by calendar month, sums their recorded costs and derives the
//! share of labor cost paid as overtime.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{DailyRecord, MonthlyRollup, Ratio, UndefinedReason, YearMonth};

/// Default number of decimal places for the overtime ratio.
pub const DEFAULT_RATIO_DECIMAL_PLACES: u32 = 3;

#[derive(Default)]
struct MonthTotals {
    days: usize,
    regular_cost: Decimal,
    overtime_cost: Decimal,
    total_labor_cost: Decimal,
}

impl MonthTotals {
    fn add(&mut self, record: &DailyRecord) -> Option<()> {
        self.regular_cost = self.regular_cost.checked_add(record.regular_cost)?;
        self.overtime_cost = self.overtime_cost.checked_add(record.overtime_cost)?;
        self.total_labor_cost = self.total_labor_cost.checked_add(record.total_labor_cost)?;
        self.days += 1;
        Some(())
    }
}

fn overflow(month: YearMonth, what: &str) -> EngineError {
    EngineError::CalculationError {
        message: format!("{} overflows in {}", what, month),
    }
}

/// Sums recorded costs per calendar month.
///
/// Months are returned in chronological order regardless of record order.
/// `overtime_ratio = overtime_cost / total_labor_cost`, rounded to
/// `decimal_places` with round-half-to-even, and undefined for a month whose
/// total labor cost is zero.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] naming the month whose totals or
/// ratio overflow.
///
/// # Examples
///
/// ```
/// use workforce_engine::calculation::monthly_rollup;
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
///     regular_cost: Decimal::from(700),
///     overtime_cost: Decimal::from(300),
///     total_labor_cost: Decimal::from(1000),
///     overtime_hours: Decimal::from(10),
/// };
///
/// let months = monthly_rollup(&[record], 3).unwrap();
/// assert_eq!(months[0].overtime_ratio.as_option(), Some(Decimal::new(3, 1)));
/// ```
pub fn monthly_rollup(
    records: &[DailyRecord],
    decimal_places: u32,
) -> EngineResult<Vec<MonthlyRollup>> {
    let mut months: BTreeMap<YearMonth, MonthTotals> = BTreeMap::new();

    for record in records {
        let month = YearMonth::of(record.date);
        months
            .entry(month)
            .or_default()
            .add(record)
            .ok_or_else(|| overflow(month, "monthly labor cost"))?;
    }

    months
        .into_iter()
        .map(|(month, totals)| {
            let overtime_ratio = if totals.total_labor_cost.is_zero() {
                Ratio::Undefined {
                    reason: UndefinedReason::ZeroTotalLaborCost,
                }
            } else {
                let value = totals
                    .overtime_cost
                    .checked_div(totals.total_labor_cost)
                    .ok_or_else(|| overflow(month, "overtime ratio"))?;
                Ratio::Defined {
                    value: value.round_dp(decimal_places),
                }
            };

            Ok(MonthlyRollup {
                month,
                days: totals.days,
                regular_cost: totals.regular_cost,
                overtime_cost: totals.overtime_cost,
                total_labor_cost: totals.total_labor_cost,
                overtime_ratio,
            })
        })
        .collect()
}
