//! Capacity and gap model for the Workforce Cost Optimization Engine.
//!
//! This module contains the pure per-record calculations: regular capacity,
//! workload gap and fulfilment ratio, the monthly cost rollup with its
//! overtime ratio, critical overtime day detection, and record validation.

mod capacity;
mod critical_days;
mod monthly_rollup;
mod validation;

pub use capacity::{compute_daily_metrics, compute_metrics, regular_capacity};
pub use critical_days::{DEFAULT_CRITICAL_OVERTIME_THRESHOLD, critical_days, is_critical_day};
pub use monthly_rollup::{DEFAULT_RATIO_DECIMAL_PLACES, monthly_rollup};
pub use validation::{rejected_indices, validate_record, validate_records};
