//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::types::{AnalysisSettings, CapacityParameters, EngineConfig, EngineConfigFile};

/// Loads and provides access to engine configuration.
///
/// Every key in the file is optional; missing keys take their documented
/// defaults. Capacity values are validated at load time so an invalid
/// configuration is rejected before any record is processed.
///
/// # File Structure
///
/// ```text
/// capacity:
///   regular_hours_per_worker: 8
///   overtime_hours_per_worker: 4
///   productivity_per_hour: 10
/// analysis:
///   critical_overtime_threshold_hours: 40
///   ratio_decimal_places: 3
/// ```
///
/// # Example
///
/// ```no_run
/// use workforce_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default.yaml")?;
/// println!("Capacity per worker: {}", loader.capacity().capacity_per_worker());
/// # Ok::<(), workforce_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML (`ConfigParseError`)
    /// - A capacity value is zero or negative (`InvalidParameter`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse(&content, &path_str)
    }

    /// Builds configuration from an in-memory YAML document.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        Self::parse(content, "<inline>")
    }

    /// Wraps an already validated configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    fn parse(content: &str, origin: &str) -> EngineResult<Self> {
        // An empty document deserializes as unit, not as an empty mapping.
        let file = if content.trim().is_empty() {
            EngineConfigFile::default()
        } else {
            serde_yaml::from_str::<EngineConfigFile>(content).map_err(|e| {
                EngineError::ConfigParseError {
                    path: origin.to_string(),
                    message: e.to_string(),
                }
            })?
        };

        let config = EngineConfig::try_from(file)?;
        Ok(Self { config })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the validated capacity parameters.
    pub fn capacity(&self) -> &CapacityParameters {
        self.config.capacity()
    }

    /// Returns the reporting settings.
    pub fn analysis(&self) -> &AnalysisSettings {
        self.config.analysis()
    }

    /// Returns the recorded-overtime threshold for critical days.
    pub fn critical_overtime_threshold(&self) -> Decimal {
        self.config.analysis().critical_overtime_threshold_hours
    }
}
