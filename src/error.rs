//! Error types for the Residency Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while validating a profile or
//! computing presence.

use thiserror::Error;

/// The main error type for the Residency Engine.
///
/// All fallible operations in the engine return this error type. A profile
/// without any qualifying-status history is not an error; see
/// [`crate::calculation::calculate_settled_snapshot`].
///
/// # Example
///
/// ```
/// use residency_engine::error::EngineError;
///
/// let error = EngineError::ValidationError {
///     field: "absences[0].from".to_string(),
///     message: "invalid date '2024-13-01'".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Validation failed for 'absences[0].from': invalid date '2024-13-01'"
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

    /// A configuration value was outside its permitted range.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The configuration key that was rejected.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A profile field failed validation (malformed date, inverted range, ...).
    #[error("Validation failed for '{field}': {message}")]
    ValidationError {
        /// Path of the offending field, e.g. `status_history[2].to`.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for building a [`EngineError::ValidationError`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
