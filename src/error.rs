//! Error types for the Workforce Cost Optimization Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while analysing and optimizing
//! staffing.

use thiserror::Error;

use crate::models::{RecordRejection, UndefinedReason};

/// The main error type for the Workforce Cost Optimization Engine.
///
/// All fallible operations in the engine return this error type. Every
/// variant names the offending parameter or record so a failed run can be
/// traced back to its input.
///
/// # Example
///
/// ```
/// use workforce_engine::error::EngineError;
///
/// let error = EngineError::InvalidParameter {
///     parameter: "productivity_per_hour".to_string(),
///     message: "must be greater than zero, got 0".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid parameter 'productivity_per_hour': must be greater than zero, got 0"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A capacity parameter was zero or negative.
    #[error("Invalid parameter '{parameter}': {message}")]
    InvalidParameter {
        /// The name of the offending parameter.
        parameter: String,
        /// A description of what made the parameter invalid.
        message: String,
    },

    /// One or more daily records failed validation and the batch was aborted.
    #[error("Invalid records ({} rejected): {}", .rejections.len(), describe_rejections(.rejections))]
    InvalidRecords {
        /// Every rejection found in the batch, in input order.
        rejections: Vec<RecordRejection>,
    },

    /// A ratio with a zero denominator was requested as a defined value.
    #[error("Undefined ratio for {context}: {reason}")]
    UndefinedRatio {
        /// What the ratio was computed for (e.g. a date or month).
        context: String,
        /// Why the ratio is undefined.
        reason: UndefinedReason,
    },

    /// A covering program was infeasible or unbounded.
    #[error("Invalid covering program: {message}")]
    InvalidProgram {
        /// A description of the defect.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

fn describe_rejections(rejections: &[RecordRejection]) -> String {
    rejections
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
