//! Application state for the Residency Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, ThresholdConfig};

/// Shared application state.
///
/// Holds the loaded rule configuration behind an `Arc`; it is never mutated
/// after startup.
#[derive(Clone)]
pub struct AppState {
    /// The loaded rule configuration.
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

    /// Returns the calculation constants.
    pub fn thresholds(&self) -> &ThresholdConfig {
        self.config.thresholds()
    }
}
