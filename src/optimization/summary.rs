//! Totals over optimization results.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{CostSummary, OptimizationResult};

/// Sums actual cost, optimized cost, saving and headcounts over `results`.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] naming the first date at which a
/// running total overflows.
///
/// # Examples
///
/// ```
/// use workforce_engine::optimization::summarize;
///
/// let summary = summarize(&[]).unwrap();
/// assert_eq!(summary.days, 0);
/// assert!(summary.total_saving.is_zero());
/// ```
pub fn summarize(results: &[OptimizationResult]) -> EngineResult<CostSummary> {
    let mut summary = CostSummary {
        days: results.len(),
        total_actual_cost: Decimal::ZERO,
        total_optimized_cost: Decimal::ZERO,
        total_saving: Decimal::ZERO,
        total_actual_attendance: 0,
        total_optimal_workers: 0,
        days_with_negative_saving: 0,
    };

    for result in results {
        let overflow = |what: &str| EngineError::CalculationError {
            message: format!("total {} overflows at {}", what, result.date),
        };

        summary.total_actual_cost = summary
            .total_actual_cost
            .checked_add(result.actual_labor_cost)
            .ok_or_else(|| overflow("actual cost"))?;
        summary.total_optimized_cost = summary
            .total_optimized_cost
            .checked_add(result.total_optimized_cost)
            .ok_or_else(|| overflow("optimized cost"))?;
        summary.total_saving = summary
            .total_saving
            .checked_add(result.cost_saving)
            .ok_or_else(|| overflow("saving"))?;
        summary.total_actual_attendance = summary
            .total_actual_attendance
            .checked_add(u64::from(result.actual_attendance))
            .ok_or_else(|| overflow("attendance"))?;
        summary.total_optimal_workers = summary
            .total_optimal_workers
            .checked_add(result.optimal_workers)
            .ok_or_else(|| overflow("optimal workers"))?;
        if result.cost_saving < Decimal::ZERO {
            summary.days_with_negative_saving += 1;
        }
    }

    Ok(summary)
}
