//! Staffing optimization outputs.
//!
//! This module contains the per-day [`OptimizationResult`] and the
//! [`CostSummary`] aggregated over a batch of results.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DateWindow, RecordRejection};

/// The minimum-cost staffing level for one day.
///
/// `cost_saving` is negative when the optimized staffing would cost more than
/// what was actually spent; it is reported as is.
///
/// # Example
///
/// ```
/// use workforce_engine::models::OptimizationResult;
/// use rust_decimal::Decimal;
/// use chrono::NaiveDate;
///
/// let result = OptimizationResult {
///     date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
///     incoming_orders: Decimal::from(500),
///     actual_attendance: 6,
///     continuous_workers: Decimal::from(500) / Decimal::from(120),
///     optimal_workers: 5,
///     per_worker_daily_cost: Decimal::from(280),
///     total_optimized_cost: Decimal::from(1400),
///     actual_labor_cost: Decimal::from(2000),
///     cost_saving: Decimal::from(600),
/// };
/// assert!(result.is_saving());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// The date of the source record.
    pub date: NaiveDate,
    /// Demand that had to be covered.
    pub incoming_orders: Decimal,
    /// Workers actually present, for comparison.
    pub actual_attendance: u32,
    /// The real-valued optimum of the day's covering program.
    pub continuous_workers: Decimal,
    /// The optimum rounded up to whole workers.
    pub optimal_workers: u64,
    /// Cost of one worker for a full regular plus overtime day.
    pub per_worker_daily_cost: Decimal,
    /// `optimal_workers × per_worker_daily_cost`.
    pub total_optimized_cost: Decimal,
    /// The labor cost actually recorded for the day.
    pub actual_labor_cost: Decimal,
    /// `actual_labor_cost − total_optimized_cost`.
    pub cost_saving: Decimal,
}

impl OptimizationResult {
    /// Returns true if the optimized staffing is cheaper than the actual one.
    pub fn is_saving(&self) -> bool {
        self.cost_saving > Decimal::ZERO
    }
}

/// Totals over a batch of optimization results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSummary {
    /// Number of days summarised.
    pub days: usize,
    /// Sum of recorded labor cost.
    pub total_actual_cost: Decimal,
    /// Sum of optimized labor cost.
    pub total_optimized_cost: Decimal,
    /// Sum of daily cost savings.
    pub total_saving: Decimal,
    /// Sum of actual attendance.
    pub total_actual_attendance: u64,
    /// Sum of optimal headcount.
    pub total_optimal_workers: u64,
    /// Days on which the optimized cost exceeded the actual cost.
    pub days_with_negative_saving: usize,
}

/// Outcome of solving a batch under an explicit [`BatchPolicy`](crate::optimization::BatchPolicy).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveOutcome {
    /// Results for every accepted record, in input order.
    pub results: Vec<OptimizationResult>,
    /// Records skipped because they failed validation.
    pub rejections: Vec<RecordRejection>,
}

/// Optimization restricted to a window of days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowedOptimization {
    /// The window that was optimized.
    pub window: DateWindow,
    /// Results for the records inside the window.
    pub results: Vec<OptimizationResult>,
    /// Totals over `results`.
    pub summary: CostSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_saving(saving: i64) -> OptimizationResult {
        OptimizationResult {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            incoming_orders: Decimal::from(500),
            actual_attendance: 6,
            continuous_workers: Decimal::from(4),
            optimal_workers: 5,
            per_worker_daily_cost: Decimal::from(280),
            total_optimized_cost: Decimal::from(1400),
            actual_labor_cost: Decimal::from(1400 + saving),
            cost_saving: Decimal::from(saving),
        }
    }

    #[test]
    fn test_is_saving_only_for_positive_saving() {
        assert!(result_with_saving(600).is_saving());
        assert!(!result_with_saving(0).is_saving());
        assert!(!result_with_saving(-100).is_saving());
    }

    #[test]
    fn test_optimization_result_serialization() {
        let json = serde_json::to_string(&result_with_saving(-100)).unwrap();
        assert!(json.contains("\"date\":\"2024-01-02\""));
        assert!(json.contains("\"optimal_workers\":5"));
        assert!(json.contains("\"cost_saving\":\"-100\""));
    }

    #[test]
    fn test_optimization_result_round_trips() {
        let original = result_with_saving(600);
        let json = serde_json::to_string(&original).unwrap();
        let back: OptimizationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }
}
