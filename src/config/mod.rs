//! Configuration loading and management for the Residency Engine.
//!
//! This module provides functionality to load the presence rule from YAML
//! files: rule metadata plus the threshold, partial-credit cap, partial-credit
//! rate, and lookback horizon.
//!
//! # Example
//!
//! ```no_run
//! use residency_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded rule: {}", config.rule().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{RuleConfig, RuleMetadata, ThresholdConfig};
