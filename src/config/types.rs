//! Configuration types for presence calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata about the residency rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMetadata {
    /// Short code identifying the rule (e.g., "PRESENCE_1095").
    pub code: String,
    /// The human-readable name of the rule.
    pub name: String,
    /// The version or effective date of the rule.
    pub version: String,
    /// URL to the official rule documentation.
    pub source_url: String,
}

/// The numeric constants that drive every presence calculation.
///
/// These are configuration, not magic numbers: calculators take a
/// `&ThresholdConfig` and never hardcode them.
///
/// # Example
///
/// ```
/// use residency_engine::config::ThresholdConfig;
/// use rust_decimal::Decimal;
///
/// let thresholds = ThresholdConfig::default();
/// assert_eq!(thresholds.threshold_days, 1095);
/// assert_eq!(thresholds.max_partial_credit_days, 365);
/// assert_eq!(thresholds.partial_credit_rate, Decimal::new(5, 1));
/// assert_eq!(thresholds.lookback_years, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Days of presence required.
    pub threshold_days: i64,
    /// Cap on credit earned from partial-countable periods.
    pub max_partial_credit_days: i64,
    /// Rate at which partial-countable days accrue (e.g., 0.5).
    pub partial_credit_rate: Decimal,
    /// Length of the rolling window ending at the reference date.
    pub lookback_years: u32,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            threshold_days: 1095,
            max_partial_credit_days: 365,
            partial_credit_rate: Decimal::new(5, 1),
            lookback_years: 5,
        }
    }
}

impl ThresholdConfig {
    /// Checks that every constant is within its permitted range.
    pub fn validate(&self) -> EngineResult<()> {
        if self.threshold_days <= 0 {
            return Err(EngineError::InvalidConfig {
                field: "threshold_days".to_string(),
                message: format!("must be positive, got {}", self.threshold_days),
            });
        }
        if self.max_partial_credit_days < 0 {
            return Err(EngineError::InvalidConfig {
                field: "max_partial_credit_days".to_string(),
                message: format!("must not be negative, got {}", self.max_partial_credit_days),
            });
        }
        if self.partial_credit_rate < Decimal::ZERO || self.partial_credit_rate > Decimal::ONE {
            return Err(EngineError::InvalidConfig {
                field: "partial_credit_rate".to_string(),
                message: format!("must be between 0 and 1, got {}", self.partial_credit_rate),
            });
        }
        if self.lookback_years == 0 {
            return Err(EngineError::InvalidConfig {
                field: "lookback_years".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// The complete rule configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct RuleConfig {
    /// Rule metadata.
    metadata: RuleMetadata,
    /// Calculation constants.
    thresholds: ThresholdConfig,
}

impl RuleConfig {
    /// Creates a new RuleConfig from its component parts.
    pub fn new(metadata: RuleMetadata, thresholds: ThresholdConfig) -> Self {
        Self {
            metadata,
            thresholds,
        }
    }

    /// Returns the rule metadata.
    pub fn rule(&self) -> &RuleMetadata {
        &self.metadata
    }

    /// Returns the calculation constants.
    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_are_valid() {
        assert!(ThresholdConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let thresholds = ThresholdConfig {
            threshold_days: 0,
            ..ThresholdConfig::default()
        };
        match thresholds.validate() {
            Err(EngineError::InvalidConfig { field, .. }) => assert_eq!(field, "threshold_days"),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_above_one_rejected() {
        let thresholds = ThresholdConfig {
            partial_credit_rate: Decimal::new(15, 1),
            ..ThresholdConfig::default()
        };
        match thresholds.validate() {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "partial_credit_rate")
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_cap_rejected() {
        let thresholds = ThresholdConfig {
            max_partial_credit_days: -1,
            ..ThresholdConfig::default()
        };
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn test_zero_lookback_rejected() {
        let thresholds = ThresholdConfig {
            lookback_years: 0,
            ..ThresholdConfig::default()
        };
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn test_thresholds_deserialize_rate_from_string() {
        let yaml = r#"
threshold_days: 1095
max_partial_credit_days: 365
partial_credit_rate: "0.5"
lookback_years: 5
"#;
        let thresholds: ThresholdConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(thresholds, ThresholdConfig::default());
    }
}
