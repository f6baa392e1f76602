//! Request types for the Workforce Cost Optimization Engine API.
//!
//! This module defines the JSON request structures for the `/analyze` and
//! `/optimize` endpoints, and their conversion into domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::CapacityParameters;
use crate::error::EngineResult;
use crate::models::{DailyRecord, DateWindow, RecordRejection, YearMonth};
use crate::optimization::BatchPolicy;

/// Request body for the `/analyze` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Capacity parameter overrides; unset values come from configuration.
    #[serde(default)]
    pub parameters: Option<CapacityParametersRequest>,
    /// The daily records to analyze.
    pub records: Vec<DailyRecordRequest>,
    /// An explicit window to optimize separately.
    #[serde(default)]
    pub window: Option<DateWindowRequest>,
    /// A calendar month to optimize separately, as `YYYY-MM`.
    ///
    /// This names one month of one year and resolves to a contiguous date
    /// window. `"2024-01"` covers January 2024 only; January of other years
    /// in the same batch is not included.
    #[serde(default)]
    pub month: Option<YearMonth>,
    /// Policy for invalid records.
    #[serde(default)]
    pub policy: BatchPolicy,
}

/// Request body for the `/optimize` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeRequest {
    /// Capacity parameter overrides; unset values come from configuration.
    #[serde(default)]
    pub parameters: Option<CapacityParametersRequest>,
    /// The daily records to optimize.
    pub records: Vec<DailyRecordRequest>,
    /// Policy for invalid records.
    #[serde(default)]
    pub policy: BatchPolicy,
}

/// Capacity parameter overrides in a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapacityParametersRequest {
    /// Regular hours per worker per day.
    #[serde(default)]
    pub regular_hours_per_worker: Option<Decimal>,
    /// Overtime hours per worker per day.
    #[serde(default)]
    pub overtime_hours_per_worker: Option<Decimal>,
    /// Units processed per worker-hour.
    #[serde(default)]
    pub productivity_per_hour: Option<Decimal>,
}

impl CapacityParametersRequest {
    /// Applies the overrides on top of `base`, validating the result.
    pub fn resolve(&self, base: &CapacityParameters) -> EngineResult<CapacityParameters> {
        CapacityParameters::new(
            self.regular_hours_per_worker
                .unwrap_or(base.regular_hours_per_worker()),
            self.overtime_hours_per_worker
                .unwrap_or(base.overtime_hours_per_worker()),
            self.productivity_per_hour
                .unwrap_or(base.productivity_per_hour()),
        )
    }
}

/// Resolves optional overrides against the configured parameters.
pub fn resolve_parameters(
    request: Option<&CapacityParametersRequest>,
    base: &CapacityParameters,
) -> EngineResult<CapacityParameters> {
    match request {
        Some(overrides) => overrides.resolve(base),
        None => Ok(*base),
    }
}

/// An inclusive date window in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateWindowRequest {
    /// The first day of the window (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the window (inclusive).
    pub end_date: NaiveDate,
}

impl AnalyzeRequest {
    /// The window to optimize separately, if any.
    ///
    /// An explicit window takes precedence over a month.
    pub fn resolve_window(&self) -> EngineResult<Option<DateWindow>> {
        match (&self.window, self.month) {
            (Some(window), _) => DateWindow::new(window.start_date, window.end_date).map(Some),
            (None, Some(month)) => Ok(Some(DateWindow::for_month(month))),
            (None, None) => Ok(None),
        }
    }
}

/// A daily record in a request.
///
/// Attendance is signed here so that a negative headcount is reported as a
/// record rejection rather than a malformed body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRecordRequest {
    /// The calendar day.
    pub date: NaiveDate,
    /// Units of work demanded.
    pub incoming_orders: Decimal,
    /// Workers actually present.
    pub actual_attendance: i64,
    /// Wage per regular hour.
    pub regular_wage_per_hour: Decimal,
    /// Wage per overtime hour.
    pub overtime_wage_per_hour: Decimal,
    /// Recorded regular cost.
    pub regular_cost: Decimal,
    /// Recorded overtime cost.
    pub overtime_cost: Decimal,
    /// Recorded total labor cost.
    pub total_labor_cost: Decimal,
    /// Recorded overtime hours for the day.
    pub overtime_hours: Decimal,
}

/// Request records converted to domain records.
///
/// Records whose attendance cannot be represented are rejected here; the
/// rest keep a mapping back to their position in the request.
#[derive(Debug, Clone, Default)]
pub struct ConvertedRecords {
    /// Records that converted, in request order.
    pub records: Vec<DailyRecord>,
    /// Request index of each converted record.
    source_index: Vec<usize>,
    /// Records that failed conversion.
    pub rejections: Vec<RecordRejection>,
}

impl ConvertedRecords {
    /// Converts every request record.
    pub fn convert(requests: Vec<DailyRecordRequest>) -> Self {
        let mut converted = Self::default();

        for (index, req) in requests.into_iter().enumerate() {
            match u32::try_from(req.actual_attendance) {
                Ok(actual_attendance) => {
                    converted.source_index.push(index);
                    converted.records.push(DailyRecord {
                        date: req.date,
                        incoming_orders: req.incoming_orders,
                        actual_attendance,
                        regular_wage_per_hour: req.regular_wage_per_hour,
                        overtime_wage_per_hour: req.overtime_wage_per_hour,
                        regular_cost: req.regular_cost,
                        overtime_cost: req.overtime_cost,
                        total_labor_cost: req.total_labor_cost,
                        overtime_hours: req.overtime_hours,
                    });
                }
                Err(_) => {
                    let message = if req.actual_attendance < 0 {
                        format!("must be non-negative, got {}", req.actual_attendance)
                    } else {
                        format!("exceeds {}, got {}", u32::MAX, req.actual_attendance)
                    };
                    converted.rejections.push(RecordRejection {
                        index,
                        date: req.date,
                        field: "actual_attendance".to_string(),
                        message,
                    });
                }
            }
        }

        converted
    }

    /// Merges rejections reported against [`Self::records`] with the
    /// conversion rejections, re-indexed to request positions and ordered by
    /// request position.
    pub fn merge_rejections(&self, engine: Vec<RecordRejection>) -> Vec<RecordRejection> {
        let mut merged: Vec<RecordRejection> = engine
            .into_iter()
            .map(|mut rejection| {
                if let Some(&index) = self.source_index.get(rejection.index) {
                    rejection.index = index;
                }
                rejection
            })
            .chain(self.rejections.iter().cloned())
            .collect();
        merged.sort_by_key(|r| r.index);
        merged
    }
}
