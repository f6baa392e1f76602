//! End-to-end analysis of a batch of daily records.
//!
//! [`run_analysis`] runs every stage of the engine over one batch: record
//! validation, daily capacity metrics, the monthly cost rollup, critical
//! overtime days, full-dataset optimization and an optional windowed
//! optimization. Each stage leaves one [`AuditStep`] in the trace.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    compute_daily_metrics, critical_days, monthly_rollup, rejected_indices, validate_records,
};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AnalysisResult, AuditStep, AuditTrace, AuditWarning, DailyRecord, DateWindow,
    WindowedOptimization,
};
use crate::optimization::{BatchPolicy, SolveOptions, select_window, solve_with_options, summarize};

/// Options for [`run_analysis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnalysisOptions {
    /// Policy for invalid records.
    pub policy: BatchPolicy,
    /// An additional date window to optimize on its own, such as one month.
    pub window: Option<DateWindow>,
    /// Solve days on the rayon thread pool.
    pub parallel: bool,
}

/// Collects audit steps with sequential step numbers.
struct AuditLog {
    steps: Vec<AuditStep>,
    warnings: Vec<AuditWarning>,
}

impl AuditLog {
    fn new() -> Self {
        Self {
            steps: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn step(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        let step_number = self.steps.len() as u32 + 1;
        self.steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning,
        });
    }

    fn warn(&mut self, code: &str, message: String, severity: &str) {
        self.warnings.push(AuditWarning {
            code: code.to_string(),
            message,
            severity: severity.to_string(),
        });
    }
}

/// Runs the full analysis over `records`.
///
/// With [`BatchPolicy::AbortBatch`] any invalid record fails the run. With
/// [`BatchPolicy::SkipInvalid`] invalid records are left out of every stage
/// and reported in [`AnalysisResult::rejections`].
///
/// # Errors
///
/// - [`EngineError::InvalidRecords`] when records are invalid under
///   [`BatchPolicy::AbortBatch`]
/// - [`EngineError::CalculationError`] if any figure overflows
///
/// # Examples
///
/// ```
/// use workforce_engine::analysis::{AnalysisOptions, run_analysis};
/// use workforce_engine::config::EngineConfig;
/// use workforce_engine::models::DailyRecord;
/// use rust_decimal::Decimal;
/// use chrono::NaiveDate;
///
/// let records = vec![DailyRecord {
///     date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
///     incoming_orders: Decimal::from(500),
///     actual_attendance: 6,
///     regular_wage_per_hour: Decimal::from(20),
///     overtime_wage_per_hour: Decimal::from(30),
///     regular_cost: Decimal::from(960),
///     overtime_cost: Decimal::from(1040),
///     total_labor_cost: Decimal::from(2000),
///     overtime_hours: Decimal::from(12),
/// }];
///
/// let result = run_analysis(&records, &EngineConfig::default(), &AnalysisOptions::default())
///     .unwrap();
/// assert_eq!(result.summary.total_saving, Decimal::from(600));
/// ```
pub fn run_analysis(
    records: &[DailyRecord],
    config: &EngineConfig,
    options: &AnalysisOptions,
) -> EngineResult<AnalysisResult> {
    let start_time = Instant::now();
    let analysis_id = Uuid::new_v4();
    let params = *config.capacity();
    let settings = config.analysis();
    let mut audit = AuditLog::new();

    info!(
        analysis_id = %analysis_id,
        records = records.len(),
        policy = ?options.policy,
        "Starting analysis"
    );

    // Validation
    let rejections = validate_records(records);
    audit.step(
        "record_validation",
        "Record Validation",
        json!({ "records": records.len(), "policy": options.policy }),
        json!({ "rejected": rejections.len() }),
        format!(
            "{} of {} records rejected",
            rejections.len(),
            records.len()
        ),
    );

    if !rejections.is_empty() {
        match options.policy {
            BatchPolicy::AbortBatch => {
                warn!(
                    analysis_id = %analysis_id,
                    rejected = rejections.len(),
                    "Analysis aborted by invalid records"
                );
                return Err(EngineError::InvalidRecords { rejections });
            }
            BatchPolicy::SkipInvalid => {
                warn!(
                    analysis_id = %analysis_id,
                    rejected = rejections.len(),
                    "Skipping invalid records"
                );
                let dates: Vec<String> = rejections.iter().map(|r| r.date.to_string()).collect();
                audit.warn(
                    "RECORDS_SKIPPED",
                    format!(
                        "{} invalid record(s) excluded from analysis: {}",
                        rejections.len(),
                        dates.join(", ")
                    ),
                    "high",
                );
            }
        }
    }

    let skipped = rejected_indices(&rejections);
    let accepted: Vec<DailyRecord> = records
        .iter()
        .enumerate()
        .filter(|(index, _)| !skipped.contains(index))
        .map(|(_, record)| record.clone())
        .collect();

    // Capacity and gap
    let daily_metrics = compute_daily_metrics(&accepted, &params)?;
    let undefined_days = daily_metrics
        .iter()
        .filter(|m| m.percentage_fulfilled.is_undefined())
        .count();
    let shortfall_days = daily_metrics
        .iter()
        .filter(|m| m.workload_gap > Decimal::ZERO)
        .count();
    audit.step(
        "daily_capacity",
        "Regular Capacity and Workload Gap",
        json!({
            "days": accepted.len(),
            "regular_hours_per_worker": params.regular_hours_per_worker(),
            "productivity_per_hour": params.productivity_per_hour(),
        }),
        json!({
            "days_with_shortfall": shortfall_days,
            "days_with_undefined_fulfilment": undefined_days,
        }),
        format!(
            "{} of {} days had demand above regular capacity",
            shortfall_days,
            daily_metrics.len()
        ),
    );
    if undefined_days > 0 {
        audit.warn(
            "UNDEFINED_FULFILMENT",
            format!(
                "{} day(s) have zero incoming orders; fulfilment is undefined",
                undefined_days
            ),
            "low",
        );
    }

    // Monthly rollup
    let monthly = monthly_rollup(&accepted, settings.ratio_decimal_places)?;
    audit.step(
        "monthly_rollup",
        "Monthly Cost Rollup",
        json!({
            "days": accepted.len(),
            "ratio_decimal_places": settings.ratio_decimal_places,
        }),
        json!({ "months": monthly.len() }),
        format!("{} day(s) grouped into {} month(s)", accepted.len(), monthly.len()),
    );
    for month in monthly.iter().filter(|m| m.overtime_ratio.is_undefined()) {
        audit.warn(
            "UNDEFINED_OVERTIME_RATIO",
            format!(
                "Total labor cost for {} is zero; overtime ratio is undefined",
                month.month
            ),
            "medium",
        );
    }

    // Critical days
    let threshold = settings.critical_overtime_threshold_hours;
    let critical = critical_days(&accepted, threshold);
    audit.step(
        "critical_days",
        "Critical Overtime Days",
        json!({ "threshold_hours": threshold }),
        json!({ "critical_days": critical.len() }),
        format!(
            "{} day(s) recorded more than {} overtime hours",
            critical.len(),
            threshold.normalize()
        ),
    );

    // Full-dataset optimization
    let solve_options = SolveOptions {
        policy: BatchPolicy::AbortBatch,
        parallel: options.parallel,
    };
    let optimization = solve_with_options(&accepted, &params, solve_options)?.results;
    let summary = summarize(&optimization)?;
    audit.step(
        "staffing_optimization",
        "Cost-Minimizing Staffing",
        json!({
            "days": accepted.len(),
            "capacity_per_worker": params.capacity_per_worker(),
            "parallel": options.parallel,
        }),
        json!({
            "total_actual_cost": summary.total_actual_cost,
            "total_optimized_cost": summary.total_optimized_cost,
            "total_saving": summary.total_saving,
        }),
        format!(
            "Optimized staffing for {} day(s) saves {} against actual cost {}",
            summary.days,
            summary.total_saving.normalize(),
            summary.total_actual_cost.normalize()
        ),
    );

    let negative_dates: Vec<String> = optimization
        .iter()
        .filter(|r| r.cost_saving < Decimal::ZERO)
        .map(|r| r.date.to_string())
        .collect();
    if !negative_dates.is_empty() {
        warn!(
            analysis_id = %analysis_id,
            days = negative_dates.len(),
            "Optimized cost exceeds actual cost"
        );
        audit.warn(
            "NEGATIVE_SAVING",
            format!(
                "Optimized cost exceeds actual cost on {} day(s): {}",
                negative_dates.len(),
                negative_dates.join(", ")
            ),
            "medium",
        );
    }

    // Window optimization
    let window = match options.window {
        Some(window) => {
            let selected = select_window(&accepted, &window);
            let results = solve_with_options(&selected, &params, solve_options)?.results;
            let window_summary = summarize(&results)?;
            audit.step(
                "window_optimization",
                "Windowed Staffing Optimization",
                json!({
                    "start_date": window.start_date,
                    "end_date": window.end_date,
                }),
                json!({
                    "days": window_summary.days,
                    "total_saving": window_summary.total_saving,
                }),
                format!(
                    "{} day(s) between {} and {} save {}",
                    window_summary.days,
                    window.start_date,
                    window.end_date,
                    window_summary.total_saving.normalize()
                ),
            );
            Some(WindowedOptimization {
                window,
                results,
                summary: window_summary,
            })
        }
        None => None,
    };

    let duration_us = start_time.elapsed().as_micros() as u64;
    info!(
        analysis_id = %analysis_id,
        days = summary.days,
        total_saving = %summary.total_saving,
        duration_us,
        "Analysis completed"
    );

    Ok(AnalysisResult {
        analysis_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        parameters: params,
        daily_metrics,
        monthly,
        critical_days: critical,
        optimization,
        summary,
        window,
        rejections,
        audit_trace: AuditTrace {
            steps: audit.steps,
            warnings: audit.warnings,
            duration_us,
        },
    })
}
