//! Analysis result models.
//!
//! This module contains the [`AnalysisResult`] type and its audit structures
//! that capture all outputs of one analysis run: daily metrics, monthly
//! rollups, critical days, optimization results and a trace of how they were
//! produced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    CostSummary, CriticalDay, DerivedDailyMetrics, MonthlyRollup, OptimizationResult,
    RecordRejection, WindowedOptimization,
};
use crate::config::CapacityParameters;

/// A single step in the audit trace recording one stage of the analysis.
///
/// Each step captures the input, output, and reasoning for the stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the stage that ran.
    pub rule_id: String,
    /// The human-readable name of the stage.
    pub rule_name: String,
    /// Summary of the stage's input.
    pub input: serde_json::Value,
    /// Summary of the stage's output.
    pub output: serde_json::Value,
    /// Human-readable explanation of the outcome.
    pub reasoning: String,
}

/// A warning generated during analysis.
///
/// Warnings flag results that are valid but deserve attention, such as a day
/// where optimization would cost more than the actual staffing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for an analysis run.
///
/// # Example
///
/// ```
/// use workforce_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// assert!(trace.warnings.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of analysis steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during analysis.
    pub warnings: Vec<AuditWarning>,
    /// The total analysis duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Unique identifier for this run.
    pub analysis_id: Uuid,
    /// When the analysis was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the analysis.
    pub engine_version: String,
    /// The capacity parameters the run used.
    pub parameters: CapacityParameters,
    /// Capacity metrics for every accepted record, in input order.
    pub daily_metrics: Vec<DerivedDailyMetrics>,
    /// Monthly cost rollups in chronological order.
    pub monthly: Vec<MonthlyRollup>,
    /// Days whose recorded overtime exceeded the critical threshold.
    pub critical_days: Vec<CriticalDay>,
    /// Optimization over every accepted record, in input order.
    pub optimization: Vec<OptimizationResult>,
    /// Totals over `optimization`.
    pub summary: CostSummary,
    /// Optimization restricted to the requested window, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<WindowedOptimization>,
    /// Records skipped under a skip-invalid policy.
    #[serde(default)]
    pub rejections: Vec<RecordRejection>,
    /// Complete audit trace of the run.
    pub audit_trace: AuditTrace,
}
