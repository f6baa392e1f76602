//! Configuration loading and management for the Workforce Cost Optimization Engine.
//!
//! This module provides functionality to load the capacity model and
//! reporting settings from a YAML file. The resulting values are immutable and
//! passed explicitly into every computation.
//!
//! # Example
//!
//! ```no_run
//! use workforce_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default.yaml").unwrap();
//! println!("Capacity per worker: {}", config.capacity().capacity_per_worker());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AnalysisSettings, CapacityParameters, CapacitySection, EngineConfig, EngineConfigFile,
};
