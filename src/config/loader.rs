//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading rule
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{RuleConfig, RuleMetadata, ThresholdConfig};

/// Loads and provides access to rule configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── rule.yaml        # Rule metadata
/// └── thresholds.yaml  # Threshold, partial-credit cap and rate, lookback
/// ```
///
/// # Example
///
/// ```no_run
/// use residency_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Threshold: {} days", loader.thresholds().threshold_days);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: RuleConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails if either file is missing, contains invalid YAML, or if the
    /// thresholds fail [`ThresholdConfig::validate`].
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<RuleMetadata>(&path.join("rule.yaml"))?;
        let thresholds = Self::load_yaml::<ThresholdConfig>(&path.join("thresholds.yaml"))?;
        thresholds.validate()?;

        tracing::debug!(
            rule = %metadata.code,
            threshold_days = thresholds.threshold_days,
            "Loaded rule configuration"
        );

        Ok(Self {
            config: RuleConfig::new(metadata, thresholds),
        })
    }

    /// Builds a loader from in-memory parts without touching the filesystem.
    pub fn from_parts(metadata: RuleMetadata, thresholds: ThresholdConfig) -> EngineResult<Self> {
        thresholds.validate()?;
        Ok(Self {
            config: RuleConfig::new(metadata, thresholds),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying rule configuration.
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Returns the rule metadata.
    pub fn rule(&self) -> &RuleMetadata {
        self.config.rule()
    }

    /// Returns the calculation constants.
    pub fn thresholds(&self) -> &ThresholdConfig {
        self.config.thresholds()
    }
}
