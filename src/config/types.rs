//! Configuration types for workforce analysis.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the validated
//! [`CapacityParameters`] value passed into every computation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

fn default_regular_hours() -> Decimal {
    Decimal::from(8)
}

fn default_overtime_hours() -> Decimal {
    Decimal::from(4)
}

fn default_productivity() -> Decimal {
    Decimal::from(10)
}

fn default_critical_threshold() -> Decimal {
    Decimal::from(40)
}

fn default_ratio_decimal_places() -> u32 {
    3
}

/// The capacity model shared by every worker, fixed for a run.
///
/// Values are guaranteed strictly positive: the only ways to obtain one are
/// [`CapacityParameters::new`], [`Default`], and deserialization, all of
/// which validate.
///
/// # Example
///
/// ```
/// use workforce_engine::config::CapacityParameters;
/// use rust_decimal::Decimal;
///
/// let params = CapacityParameters::default();
/// assert_eq!(params.capacity_per_worker(), Decimal::from(120));
///
/// let invalid = CapacityParameters::new(Decimal::from(8), Decimal::ZERO, Decimal::from(10));
/// assert!(invalid.is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CapacitySection")]
pub struct CapacityParameters {
    regular_hours_per_worker: Decimal,
    overtime_hours_per_worker: Decimal,
    productivity_per_hour: Decimal,
}

impl CapacityParameters {
    /// Creates validated parameters.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] naming the first parameter
    /// that is zero or negative.
    pub fn new(
        regular_hours_per_worker: Decimal,
        overtime_hours_per_worker: Decimal,
        productivity_per_hour: Decimal,
    ) -> EngineResult<Self> {
        require_positive("regular_hours_per_worker", regular_hours_per_worker)?;
        require_positive("overtime_hours_per_worker", overtime_hours_per_worker)?;
        require_positive("productivity_per_hour", productivity_per_hour)?;

        // The derived per-worker figures must be representable.
        let hours = regular_hours_per_worker
            .checked_add(overtime_hours_per_worker)
            .ok_or_else(|| overflow("hours_per_worker"))?;
        hours
            .checked_mul(productivity_per_hour)
            .ok_or_else(|| overflow("capacity_per_worker"))?;

        Ok(Self {
            regular_hours_per_worker,
            overtime_hours_per_worker,
            productivity_per_hour,
        })
    }

    /// Hours a worker contributes at the regular rate.
    pub fn regular_hours_per_worker(&self) -> Decimal {
        self.regular_hours_per_worker
    }

    /// Hours a worker may additionally contribute at the overtime rate.
    pub fn overtime_hours_per_worker(&self) -> Decimal {
        self.overtime_hours_per_worker
    }

    /// Output units one worker produces per hour.
    pub fn productivity_per_hour(&self) -> Decimal {
        self.productivity_per_hour
    }

    /// Regular plus overtime hours per worker.
    pub fn hours_per_worker(&self) -> Decimal {
        self.regular_hours_per_worker + self.overtime_hours_per_worker
    }

    /// Output units one worker supplies over a full regular plus overtime day.
    pub fn capacity_per_worker(&self) -> Decimal {
        self.hours_per_worker() * self.productivity_per_hour
    }
}

impl Default for CapacityParameters {
    fn default() -> Self {
        Self {
            regular_hours_per_worker: default_regular_hours(),
            overtime_hours_per_worker: default_overtime_hours(),
            productivity_per_hour: default_productivity(),
        }
    }
}

impl TryFrom<CapacitySection> for CapacityParameters {
    type Error = EngineError;

    fn try_from(section: CapacitySection) -> Result<Self, Self::Error> {
        Self::new(
            section.regular_hours_per_worker,
            section.overtime_hours_per_worker,
            section.productivity_per_hour,
        )
    }
}

fn require_positive(parameter: &str, value: Decimal) -> EngineResult<()> {
    if value > Decimal::ZERO {
        Ok(())
    } else {
        Err(EngineError::InvalidParameter {
            parameter: parameter.to_string(),
            message: format!("must be greater than zero, got {}", value.normalize()),
        })
    }
}

fn overflow(parameter: &str) -> EngineError {
    EngineError::InvalidParameter {
        parameter: parameter.to_string(),
        message: "derived value overflows".to_string(),
    }
}

/// Unvalidated capacity section as written in a configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct CapacitySection {
    /// Hours a worker contributes at the regular rate.
    #[serde(default = "default_regular_hours")]
    pub regular_hours_per_worker: Decimal,
    /// Hours a worker may additionally contribute at the overtime rate.
    #[serde(default = "default_overtime_hours")]
    pub overtime_hours_per_worker: Decimal,
    /// Output units one worker produces per hour.
    #[serde(default = "default_productivity")]
    pub productivity_per_hour: Decimal,
}

impl Default for CapacitySection {
    fn default() -> Self {
        Self {
            regular_hours_per_worker: default_regular_hours(),
            overtime_hours_per_worker: default_overtime_hours(),
            productivity_per_hour: default_productivity(),
        }
    }
}

/// Reporting settings that are not part of the capacity model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Recorded overtime hours above which a day is critical.
    #[serde(default = "default_critical_threshold")]
    pub critical_overtime_threshold_hours: Decimal,
    /// Decimal places the monthly overtime ratio is rounded to.
    #[serde(default = "default_ratio_decimal_places")]
    pub ratio_decimal_places: u32,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            critical_overtime_threshold_hours: default_critical_threshold(),
            ratio_decimal_places: default_ratio_decimal_places(),
        }
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfigFile {
    /// Capacity model section.
    #[serde(default)]
    pub capacity: CapacitySection,
    /// Reporting settings section.
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

/// The complete, validated engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    /// Validated capacity parameters.
    capacity: CapacityParameters,
    /// Reporting settings.
    analysis: AnalysisSettings,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(capacity: CapacityParameters, analysis: AnalysisSettings) -> Self {
        Self { capacity, analysis }
    }

    /// Returns the capacity parameters.
    pub fn capacity(&self) -> &CapacityParameters {
        &self.capacity
    }

    /// Returns the reporting settings.
    pub fn analysis(&self) -> &AnalysisSettings {
        &self.analysis
    }
}

impl TryFrom<EngineConfigFile> for EngineConfig {
    type Error = EngineError;

    fn try_from(file: EngineConfigFile) -> Result<Self, Self::Error> {
        Ok(Self::new(file.capacity.try_into()?, file.analysis))
    }
}
