//! Cost-minimizing staffing solver.
//!
//! For each day the solver builds a [`CoveringProgram`], solves it for the
//! minimum real-valued headcount, rounds that up to whole workers and prices
//! the result. Days never interact, so the same per-day logic serves a single
//! month or a full dataset, sequentially or in parallel.

use rayon::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::program::CoveringProgram;
use crate::calculation::{rejected_indices, validate_records};
use crate::config::CapacityParameters;
use crate::error::{EngineError, EngineResult};
use crate::models::{DailyRecord, DateWindow, OptimizationResult, SolveOutcome};

/// What to do when a batch contains invalid records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Fail the whole batch, reporting every invalid record.
    #[default]
    AbortBatch,
    /// Solve the valid records and return the invalid ones as rejections.
    SkipInvalid,
}

/// Options controlling a solver run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolveOptions {
    /// Policy for invalid records.
    pub policy: BatchPolicy,
    /// Evaluate days on the rayon thread pool.
    pub parallel: bool,
}

/// Cost of one worker for a full day: regular hours at the regular wage plus
/// overtime hours at the overtime wage.
pub fn per_worker_daily_cost(
    record: &DailyRecord,
    params: &CapacityParameters,
) -> EngineResult<Decimal> {
    let regular = record
        .regular_wage_per_hour
        .checked_mul(params.regular_hours_per_worker());
    let overtime = record
        .overtime_wage_per_hour
        .checked_mul(params.overtime_hours_per_worker());

    regular
        .zip(overtime)
        .and_then(|(regular, overtime)| regular.checked_add(overtime))
        .ok_or_else(|| overflow(record, "per-worker daily cost"))
}

/// Rounds a real-valued headcount up to whole workers.
///
/// Decimal division rounds at 28 significant digits, so the ceiling is
/// re-checked against the exact products: `n × capacity ≥ demand` and
/// `(n − 1) × capacity < demand` hold on return.
fn ceil_workers(
    continuous: Decimal,
    demand: Decimal,
    capacity_per_worker: Decimal,
) -> Option<Decimal> {
    let mut workers = continuous.ceil().max(Decimal::ZERO);

    if workers.checked_mul(capacity_per_worker)? < demand {
        workers += Decimal::ONE;
    }
    while workers > Decimal::ZERO
        && (workers - Decimal::ONE).checked_mul(capacity_per_worker)? >= demand
    {
        workers -= Decimal::ONE;
    }

    Some(workers)
}

/// Optimizes staffing for a single day.
///
/// The record is assumed to have passed validation; [`solve`] and its
/// variants validate before calling this.
///
/// # Examples
///
/// ```
/// use workforce_engine::optimization::optimize_day;
/// use workforce_engine::config::CapacityParameters;
/// use workforce_engine::models::DailyRecord;
/// use rust_decimal::Decimal;
/// use chrono::NaiveDate;
///
/// let record = DailyRecord {
///     date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
///     incoming_orders: Decimal::from(500),
///     actual_attendance: 6,
///     regular_wage_per_hour: Decimal::from(20),
///     overtime_wage_per_hour: Decimal::from(30),
///     regular_cost: Decimal::from(960),
///     overtime_cost: Decimal::from(1040),
///     total_labor_cost: Decimal::from(2000),
///     overtime_hours: Decimal::from(12),
/// };
///
/// let result = optimize_day(&record, &CapacityParameters::default()).unwrap();
/// assert_eq!(result.optimal_workers, 5);
/// assert_eq!(result.per_worker_daily_cost, Decimal::from(280));
/// assert_eq!(result.total_optimized_cost, Decimal::from(1400));
/// assert_eq!(result.cost_saving, Decimal::from(600));
/// ```
pub fn optimize_day(
    record: &DailyRecord,
    params: &CapacityParameters,
) -> EngineResult<OptimizationResult> {
    let cost = per_worker_daily_cost(record, params)?;
    let solution = CoveringProgram::staffing(cost, record.incoming_orders, params)
        .solve()
        .map_err(|error| match error {
            EngineError::CalculationError { .. } => overflow(record, "staffing program"),
            other => other,
        })?;

    let workers = ceil_workers(
        solution.value,
        record.incoming_orders,
        params.capacity_per_worker(),
    )
    .ok_or_else(|| overflow(record, "headcount"))?;
    let optimal_workers = workers
        .to_u64()
        .ok_or_else(|| overflow(record, "headcount"))?;

    let total_optimized_cost = workers
        .checked_mul(cost)
        .ok_or_else(|| overflow(record, "optimized cost"))?;
    let cost_saving = record
        .total_labor_cost
        .checked_sub(total_optimized_cost)
        .ok_or_else(|| overflow(record, "cost saving"))?;

    Ok(OptimizationResult {
        date: record.date,
        incoming_orders: record.incoming_orders,
        actual_attendance: record.actual_attendance,
        continuous_workers: solution.value,
        optimal_workers,
        per_worker_daily_cost: cost,
        total_optimized_cost,
        actual_labor_cost: record.total_labor_cost,
        cost_saving,
    })
}

fn overflow(record: &DailyRecord, what: &str) -> EngineError {
    EngineError::CalculationError {
        message: format!("{} overflows on {}", what, record.date),
    }
}

/// Solves every record, aborting the batch if any record is invalid.
///
/// Results are in input order, one per record.
///
/// # Errors
///
/// - [`EngineError::InvalidRecords`] listing every invalid record by date
/// - [`EngineError::CalculationError`] if a day's figures overflow
pub fn solve(
    records: &[DailyRecord],
    params: &CapacityParameters,
) -> EngineResult<Vec<OptimizationResult>> {
    solve_with_options(records, params, SolveOptions::default()).map(|outcome| outcome.results)
}

/// Solves every record on the rayon thread pool.
///
/// Produces exactly the same results, in the same order, as [`solve`].
pub fn solve_parallel(
    records: &[DailyRecord],
    params: &CapacityParameters,
) -> EngineResult<Vec<OptimizationResult>> {
    let options = SolveOptions {
        parallel: true,
        ..SolveOptions::default()
    };
    solve_with_options(records, params, options).map(|outcome| outcome.results)
}

/// Solves a batch under an explicit invalid-record policy.
pub fn solve_with_policy(
    records: &[DailyRecord],
    params: &CapacityParameters,
    policy: BatchPolicy,
) -> EngineResult<SolveOutcome> {
    let options = SolveOptions {
        policy,
        ..SolveOptions::default()
    };
    solve_with_options(records, params, options)
}

/// Solves a batch with full control over policy and execution.
pub fn solve_with_options(
    records: &[DailyRecord],
    params: &CapacityParameters,
    options: SolveOptions,
) -> EngineResult<SolveOutcome> {
    let rejections = validate_records(records);

    if !rejections.is_empty() {
        match options.policy {
            BatchPolicy::AbortBatch => {
                warn!(
                    rejected = rejections.len(),
                    first_date = %rejections[0].date,
                    "Aborting batch with invalid records"
                );
                return Err(EngineError::InvalidRecords { rejections });
            }
            BatchPolicy::SkipInvalid => {
                warn!(
                    rejected = rejections.len(),
                    "Skipping invalid records"
                );
            }
        }
    }

    let skipped = rejected_indices(&rejections);
    let accepted: Vec<&DailyRecord> = records
        .iter()
        .enumerate()
        .filter(|(index, _)| !skipped.contains(index))
        .map(|(_, record)| record)
        .collect();

    debug!(
        days = accepted.len(),
        parallel = options.parallel,
        capacity_per_worker = %params.capacity_per_worker(),
        "Solving staffing programs"
    );

    let results = if options.parallel {
        accepted
            .par_iter()
            .map(|record| optimize_day(record, params))
            .collect::<EngineResult<Vec<_>>>()?
    } else {
        accepted
            .iter()
            .map(|record| optimize_day(record, params))
            .collect::<EngineResult<Vec<_>>>()?
    };

    Ok(SolveOutcome {
        results,
        rejections,
    })
}

/// Returns the records whose dates fall in `window`, in input order.
pub fn select_window(records: &[DailyRecord], window: &DateWindow) -> Vec<DailyRecord> {
    records
        .iter()
        .filter(|record| window.contains_date(record.date))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::YearMonth;
    use crate::optimization::closed_form_headcount;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(m: u32, d: u32, orders: &str, total_cost: &str) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(2024, m, d).unwrap(),
            incoming_orders: dec(orders),
            actual_attendance: 6,
            regular_wage_per_hour: dec("20"),
            overtime_wage_per_hour: dec("30"),
            regular_cost: dec("960"),
            overtime_cost: dec(total_cost) - dec("960"),
            total_labor_cost: dec(total_cost),
            overtime_hours: dec("12"),
        }
    }

    // ==========================================================================
    // Scenario A: zero demand needs no workers
    // ==========================================================================
    #[test]
    fn test_zero_orders_need_zero_workers() {
        let result = optimize_day(&record(1, 2, "0", "2000"), &CapacityParameters::default())
            .unwrap();

        assert_eq!(result.continuous_workers, Decimal::ZERO);
        assert_eq!(result.optimal_workers, 0);
        assert_eq!(result.total_optimized_cost, Decimal::ZERO);
        assert_eq!(result.cost_saving, dec("2000"));
    }

    // ==========================================================================
    // Scenarios B, C and D: 500 orders, wages 20/30, actual cost 2000
    // ==========================================================================
    #[test]
    fn test_five_hundred_orders_scenario() {
        let params = CapacityParameters::default();
        let result = optimize_day(&record(1, 2, "500", "2000"), &params).unwrap();

        assert_eq!(
            result.continuous_workers,
            closed_form_headcount(dec("500"), &params).unwrap()
        );
        assert_eq!(result.optimal_workers, 5);
        assert_eq!(result.per_worker_daily_cost, dec("280"));
        assert_eq!(result.total_optimized_cost, dec("1400"));
        assert_eq!(result.actual_labor_cost, dec("2000"));
        assert_eq!(result.cost_saving, dec("600"));
        assert!(result.is_saving());
    }

    #[test]
    fn test_exact_multiple_is_not_rounded_up() {
        let result = optimize_day(&record(1, 2, "480", "2000"), &CapacityParameters::default())
            .unwrap();
        assert_eq!(result.optimal_workers, 4);
    }

    #[test]
    fn test_tiny_excess_rounds_up() {
        let result = optimize_day(
            &record(1, 2, "480.0001", "2000"),
            &CapacityParameters::default(),
        )
        .unwrap();
        assert_eq!(result.optimal_workers, 5);
    }

    #[test]
    fn test_rounding_never_goes_down() {
        // 121 / 120 = 1.008...: nearest would be 1, policy requires 2
        let result = optimize_day(&record(1, 2, "121", "2000"), &CapacityParameters::default())
            .unwrap();
        assert_eq!(result.optimal_workers, 2);
    }

    #[test]
    fn test_negative_saving_is_reported() {
        let result = optimize_day(&record(1, 2, "1200", "1000"), &CapacityParameters::default())
            .unwrap();
        assert_eq!(result.optimal_workers, 10);
        assert_eq!(result.total_optimized_cost, dec("2800"));
        assert_eq!(result.cost_saving, dec("-1800"));
        assert!(!result.is_saving());
    }

    #[test]
    fn test_solve_preserves_input_order() {
        let records = vec![
            record(1, 9, "100", "500"),
            record(1, 1, "700", "2500"),
            record(1, 5, "0", "0"),
        ];

        let results = solve(&records, &CapacityParameters::default()).unwrap();

        let dates: Vec<u32> = results.iter().map(|r| chrono::Datelike::day(&r.date)).collect();
        assert_eq!(dates, vec![9, 1, 5]);
        assert_eq!(results[0].optimal_workers, 1);
        assert_eq!(results[1].optimal_workers, 6);
        assert_eq!(results[2].optimal_workers, 0);
    }

    // ==========================================================================
    // Scenario E: negative demand aborts the batch
    // ==========================================================================
    #[test]
    fn test_negative_orders_abort_batch() {
        let records = vec![record(1, 2, "500", "2000"), record(1, 3, "-10", "2000")];

        match solve(&records, &CapacityParameters::default()) {
            Err(EngineError::InvalidRecords { rejections }) => {
                assert_eq!(rejections.len(), 1);
                assert_eq!(rejections[0].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
                assert_eq!(rejections[0].field, "incoming_orders");
            }
            other => panic!("Expected InvalidRecords, got {:?}", other),
        }
    }

    #[test]
    fn test_skip_policy_returns_valid_results_and_rejections() {
        let records = vec![
            record(1, 2, "500", "2000"),
            record(1, 3, "-10", "2000"),
            record(1, 4, "240", "800"),
        ];

        let outcome = solve_with_policy(
            &records,
            &CapacityParameters::default(),
            BatchPolicy::SkipInvalid,
        )
        .unwrap();

        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.results[0].date, records[0].date);
        assert_eq!(outcome.results[1].date, records[2].date);
        assert_eq!(outcome.rejections.len(), 1);
        assert_eq!(outcome.rejections[0].index, 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let records: Vec<DailyRecord> = (1..=28)
            .map(|d| record(2, d, &(d * 37).to_string(), "1500"))
            .collect();
        let params = CapacityParameters::default();

        let sequential = solve(&records, &params).unwrap();
        let parallel = solve_parallel(&records, &params).unwrap();

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_parallel_aborts_on_invalid_record() {
        let records = vec![record(1, 2, "-1", "2000")];
        assert!(matches!(
            solve_parallel(&records, &CapacityParameters::default()),
            Err(EngineError::InvalidRecords { .. })
        ));
    }

    #[test]
    fn test_window_uses_same_logic_as_full_dataset() {
        let records = vec![
            record(1, 30, "500", "2000"),
            record(2, 1, "250", "900"),
            record(1, 31, "130", "700"),
        ];
        let params = CapacityParameters::default();

        let full = solve(&records, &params).unwrap();
        let january = select_window(
            &records,
            &DateWindow::for_month(YearMonth::new(2024, 1).unwrap()),
        );
        let january_results = solve(&january, &params).unwrap();

        assert_eq!(january_results.len(), 2);
        assert_eq!(january_results[0], full[0]);
        assert_eq!(january_results[1], full[2]);
    }

    #[test]
    fn test_empty_batch_solves_to_empty() {
        assert!(solve(&[], &CapacityParameters::default()).unwrap().is_empty());
    }

    fn expect_overflow(result: EngineResult<OptimizationResult>, what: &str) {
        match result {
            Err(EngineError::CalculationError { message }) => {
                assert!(message.contains(what), "unexpected message: {}", message);
                assert!(message.contains("2024-01-02"), "missing date: {}", message);
            }
            other => panic!("Expected CalculationError, got {:?}", other),
        }
    }

    #[test]
    fn test_wage_overflow_names_the_day() {
        let mut day = record(1, 2, "500", "2000");
        day.regular_wage_per_hour = Decimal::MAX;

        expect_overflow(
            optimize_day(&day, &CapacityParameters::default()),
            "per-worker daily cost",
        );
    }

    #[test]
    fn test_headcount_beyond_u64_names_the_day() {
        let mut day = record(1, 2, "1000000000000000000000000000", "2000");
        day.regular_wage_per_hour = Decimal::ZERO;
        day.overtime_wage_per_hour = Decimal::ZERO;

        expect_overflow(
            optimize_day(&day, &CapacityParameters::default()),
            "headcount",
        );
    }

    #[test]
    fn test_optimized_cost_overflow_names_the_day() {
        // 180 orders need 1.5 workers; the objective fits but two whole
        // workers at 5e28 each do not.
        let mut day = record(1, 2, "180", "2000");
        day.regular_wage_per_hour = dec("6250000000000000000000000000");
        day.overtime_wage_per_hour = Decimal::ZERO;

        expect_overflow(
            optimize_day(&day, &CapacityParameters::default()),
            "optimized cost",
        );
    }

    #[test]
    fn test_program_overflow_names_the_day() {
        let mut day = record(1, 2, "1000000000000000000000000000", "2000");
        day.regular_wage_per_hour = dec("1000000000");

        expect_overflow(
            optimize_day(&day, &CapacityParameters::default()),
            "staffing program",
        );
    }

    #[test]
    fn test_cost_saving_overflow_names_the_day() {
        let mut day = record(1, 2, "500", "2000");
        day.total_labor_cost = Decimal::MIN;

        expect_overflow(
            optimize_day(&day, &CapacityParameters::default()),
            "cost saving",
        );
    }

    #[test]
    fn test_batch_overflow_aborts_solve() {
        let mut day = record(1, 2, "500", "2000");
        day.overtime_wage_per_hour = Decimal::MAX;

        assert!(matches!(
            solve(&[day], &CapacityParameters::default()),
            Err(EngineError::CalculationError { .. })
        ));
    }

    #[test]
    fn test_ceil_workers_corrects_truncated_quotient() {
        let capacity = dec("3");
        // The exact quotient is 1/3 above 3; a truncated value must still round to 4.
        assert_eq!(ceil_workers(dec("3"), dec("10"), capacity), Some(dec("4")));
        // An overestimate is pulled back to the tight ceiling.
        assert_eq!(ceil_workers(dec("5"), dec("9"), capacity), Some(dec("3")));
    }
}
