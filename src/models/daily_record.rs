//! Daily input records and calendar helpers.
//!
//! This module contains the [`DailyRecord`] input type together with the
//! calendar types used to slice a dataset: [`YearMonth`] for monthly rollups
//! and [`DateWindow`] for optimizing a contiguous range of days.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One calendar day of workforce input data.
///
/// Records are supplied by an external loading layer and treated as
/// immutable. `total_labor_cost` is expected to equal
/// `regular_cost + overtime_cost`; the engine carries it as given.
///
/// # Example
///
/// ```
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
/// assert_eq!(record.actual_attendance, 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// The calendar day this record describes.
    pub date: NaiveDate,
    /// Demand quantity received for the day.
    pub incoming_orders: Decimal,
    /// Number of workers actually present.
    pub actual_attendance: u32,
    /// Regular wage paid per worker-hour.
    pub regular_wage_per_hour: Decimal,
    /// Overtime wage paid per worker-hour.
    pub overtime_wage_per_hour: Decimal,
    /// Regular labor cost actually incurred.
    pub regular_cost: Decimal,
    /// Overtime labor cost actually incurred.
    pub overtime_cost: Decimal,
    /// Total labor cost actually incurred.
    pub total_labor_cost: Decimal,
    /// Overtime hours actually worked across the workforce.
    pub overtime_hours: Decimal,
}

/// A record that failed validation.
///
/// Rejections identify the record by its position in the batch and its date,
/// so a caller can report exactly which days were refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRejection {
    /// Position of the record in the submitted batch.
    pub index: usize,
    /// The date of the rejected record.
    pub date: NaiveDate,
    /// The field that failed validation.
    pub field: String,
    /// A description of the failure.
    pub message: String,
}

impl fmt::Display for RecordRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "record {} ({}) {}: {}",
            self.index, self.date, self.field, self.message
        )
    }
}

/// A calendar month, used as the grouping key for monthly rollups.
///
/// Serialises as `"YYYY-MM"`. Ordering is chronological.
///
/// # Example
///
/// ```
/// use workforce_engine::models::YearMonth;
/// use chrono::NaiveDate;
///
/// let month = YearMonth::of(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(month.to_string(), "2024-02");
/// assert_eq!(month.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a month, rejecting month numbers outside `1..=12`.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| Self { year, month })
            .ok_or_else(|| EngineError::InvalidParameter {
                parameter: "month".to_string(),
                message: format!("not a calendar month: {}-{}", year, month),
            })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month number, 1 through 12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidParameter {
            parameter: "month".to_string(),
            message: format!("expected YYYY-MM, got '{}'", s),
        };
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// An inclusive, contiguous range of days to optimize over.
///
/// # Example
///
/// ```
/// use workforce_engine::models::{DateWindow, YearMonth};
/// use chrono::NaiveDate;
///
/// let january = DateWindow::for_month(YearMonth::new(2024, 1).unwrap());
/// assert!(january.contains_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
/// assert!(january.contains_date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
/// assert!(!january.contains_date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// The first day of the window (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the window (inclusive).
    pub end_date: NaiveDate,
}

impl DateWindow {
    /// Creates a window, rejecting an end date before the start date.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        if end_date < start_date {
            return Err(EngineError::InvalidParameter {
                parameter: "window".to_string(),
                message: format!("end {} is before start {}", end_date, start_date),
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// The window covering every day of `month`.
    pub fn for_month(month: YearMonth) -> Self {
        Self {
            start_date: month.first_day(),
            end_date: month.last_day(),
        }
    }

    /// Checks if a given date falls within this window, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}
