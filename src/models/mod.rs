//! Core data models for the Workforce Cost Optimization Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod analysis_result;
mod daily_record;
mod metrics;
mod optimization_result;

pub use analysis_result::{AnalysisResult, AuditStep, AuditTrace, AuditWarning};
pub use daily_record::{DailyRecord, DateWindow, RecordRejection, YearMonth};
pub use metrics::{CriticalDay, DerivedDailyMetrics, MonthlyRollup, Ratio, UndefinedReason};
pub use optimization_result::{
    CostSummary, OptimizationResult, SolveOutcome, WindowedOptimization,
};
