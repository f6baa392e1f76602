//! Application state for the Workforce Cost Optimization Engine API.

use std::sync::Arc;

use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the engine configuration loaded at startup. Requests may override
/// capacity parameters per call but never modify the shared configuration.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_app_state_shares_configuration() {
        let state = AppState::new(
            ConfigLoader::from_yaml_str("capacity:\n  productivity_per_hour: 5\n").unwrap(),
        );
        let cloned = state.clone();

        assert_eq!(
            cloned.config().capacity().capacity_per_worker(),
            Decimal::from(60)
        );
        assert!(Arc::ptr_eq(&state.config, &cloned.config));
    }
}
