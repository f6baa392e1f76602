//! Derived capacity metrics.
//!
//! These types are produced by the capacity and gap model: per-day metrics,
//! monthly cost rollups and critical days. Ratios with a zero denominator are
//! carried as [`Ratio::Undefined`] rather than coerced to a number.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::YearMonth;
use crate::error::{EngineError, EngineResult};

/// Why a ratio could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedReason {
    /// `percentage_fulfilled` was requested for a day with no incoming orders.
    ZeroIncomingOrders,
    /// `overtime_ratio` was requested for a month with no labor cost.
    ZeroTotalLaborCost,
}

impl fmt::Display for UndefinedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndefinedReason::ZeroIncomingOrders => write!(f, "incoming orders are zero"),
            UndefinedReason::ZeroTotalLaborCost => write!(f, "total labor cost is zero"),
        }
    }
}

/// A ratio that may be undefined because its denominator is zero.
///
/// # Example
///
/// ```
/// use workforce_engine::models::{Ratio, UndefinedReason};
/// use rust_decimal::Decimal;
///
/// let ratio = Ratio::Defined { value: Decimal::new(3, 1) };
/// assert_eq!(ratio.as_option(), Some(Decimal::new(3, 1)));
///
/// let undefined = Ratio::Undefined { reason: UndefinedReason::ZeroTotalLaborCost };
/// assert!(undefined.is_undefined());
/// assert!(undefined.value("2024-01").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Ratio {
    /// The ratio has a value.
    Defined {
        /// The computed ratio.
        value: Decimal,
    },
    /// The ratio's denominator was zero.
    Undefined {
        /// Why the ratio is undefined.
        reason: UndefinedReason,
    },
}

impl Ratio {
    /// Divides `numerator` by `denominator`, or marks the ratio undefined
    /// with `reason` when the denominator is zero.
    pub fn of(numerator: Decimal, denominator: Decimal, reason: UndefinedReason) -> Self {
        match numerator.checked_div(denominator) {
            Some(value) if !denominator.is_zero() => Ratio::Defined { value },
            _ => Ratio::Undefined { reason },
        }
    }

    /// Returns true if the ratio has no value.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Ratio::Undefined { .. })
    }

    /// Returns the value if defined.
    pub fn as_option(&self) -> Option<Decimal> {
        match self {
            Ratio::Defined { value } => Some(*value),
            Ratio::Undefined { .. } => None,
        }
    }

    /// Returns the value, or an [`EngineError::UndefinedRatio`] naming `context`.
    pub fn value(&self, context: impl Into<String>) -> EngineResult<Decimal> {
        match self {
            Ratio::Defined { value } => Ok(*value),
            Ratio::Undefined { reason } => Err(EngineError::UndefinedRatio {
                context: context.into(),
                reason: *reason,
            }),
        }
    }

    /// Applies `f` to a defined value; undefined ratios pass through.
    pub fn map(self, f: impl FnOnce(Decimal) -> Decimal) -> Self {
        match self {
            Ratio::Defined { value } => Ratio::Defined { value: f(value) },
            undefined => undefined,
        }
    }
}

/// Capacity metrics derived from one [`DailyRecord`](super::DailyRecord).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedDailyMetrics {
    /// The date of the source record.
    pub date: NaiveDate,
    /// Demand carried over from the source record.
    pub incoming_orders: Decimal,
    /// Output achievable by present workers within regular hours.
    pub regular_capacity: Decimal,
    /// Demand minus regular capacity; negative when capacity exceeds demand.
    pub workload_gap: Decimal,
    /// Share of demand covered by regular capacity, capped at 1.
    pub percentage_fulfilled: Ratio,
}

/// Labor costs summed over one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRollup {
    /// The calendar month.
    pub month: YearMonth,
    /// Number of records in the month.
    pub days: usize,
    /// Sum of regular cost.
    pub regular_cost: Decimal,
    /// Sum of overtime cost.
    pub overtime_cost: Decimal,
    /// Sum of total labor cost.
    pub total_labor_cost: Decimal,
    /// Overtime cost as a share of total labor cost, rounded.
    pub overtime_ratio: Ratio,
}

/// A day whose recorded overtime exceeded the critical threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalDay {
    /// The date of the record.
    pub date: NaiveDate,
    /// Overtime hours actually worked that day.
    pub overtime_hours: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_of_zero_denominator_is_undefined() {
        let ratio = Ratio::of(
            Decimal::from(400),
            Decimal::ZERO,
            UndefinedReason::ZeroIncomingOrders,
        );
        assert_eq!(
            ratio,
            Ratio::Undefined {
                reason: UndefinedReason::ZeroIncomingOrders
            }
        );
    }

    #[test]
    fn test_ratio_of_divides() {
        let ratio = Ratio::of(
            Decimal::from(300),
            Decimal::from(1000),
            UndefinedReason::ZeroTotalLaborCost,
        );
        assert_eq!(ratio.as_option(), Some(Decimal::new(3, 1)));
    }

    #[test]
    fn test_ratio_value_reports_context() {
        let ratio = Ratio::Undefined {
            reason: UndefinedReason::ZeroTotalLaborCost,
        };
        match ratio.value("overtime_ratio for 2024-01") {
            Err(EngineError::UndefinedRatio { context, reason }) => {
                assert_eq!(context, "overtime_ratio for 2024-01");
                assert_eq!(reason, UndefinedReason::ZeroTotalLaborCost);
            }
            other => panic!("Expected UndefinedRatio, got {:?}", other),
        }
    }

    #[test]
    fn test_ratio_map_leaves_undefined_untouched() {
        let undefined = Ratio::Undefined {
            reason: UndefinedReason::ZeroIncomingOrders,
        };
        assert_eq!(undefined.map(|v| v + Decimal::ONE), undefined);

        let defined = Ratio::Defined {
            value: Decimal::from(2),
        };
        assert_eq!(defined.map(|v| v.min(Decimal::ONE)).as_option(), Some(Decimal::ONE));
    }

    #[test]
    fn test_ratio_serialization_is_tagged() {
        let defined = Ratio::Defined {
            value: Decimal::new(3, 1),
        };
        let json = serde_json::to_string(&defined).unwrap();
        assert_eq!(json, r#"{"status":"defined","value":"0.3"}"#);

        let undefined = Ratio::Undefined {
            reason: UndefinedReason::ZeroIncomingOrders,
        };
        let json = serde_json::to_string(&undefined).unwrap();
        assert_eq!(
            json,
            r#"{"status":"undefined","reason":"zero_incoming_orders"}"#
        );
    }

    #[test]
    fn test_ratio_deserialization() {
        let ratio: Ratio =
            serde_json::from_str(r#"{"status":"undefined","reason":"zero_total_labor_cost"}"#)
                .unwrap();
        assert_eq!(
            ratio,
            Ratio::Undefined {
                reason: UndefinedReason::ZeroTotalLaborCost
            }
        );
    }
}
