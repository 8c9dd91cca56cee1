//! Error types for the Parafiscal Calculation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while quoting a payroll.
//!
//! Cap violations are deliberately absent: an allocation that exceeds the
//! statutory ceiling is a reportable [`ValidationResult`](crate::models::ValidationResult),
//! not an error.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Parafiscal Calculation Engine.
///
/// Every fallible operation in the engine returns this error type. Caller
/// mistakes are never clamped or coerced; they surface here instead.
///
/// # Example
///
/// ```
/// use parafiscal_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/contributions.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/contributions.yaml"
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

    /// Configuration parsed but violates a structural rule (rate out of
    /// range, bracket gap or overlap, negative ceiling).
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of what is wrong with the configuration.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee '{employee_id}' field '{field}': {message}")]
    InvalidEmployee {
        /// The ID of the offending employee.
        employee_id: String,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A calculation input was outside its allowed domain.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The name of the offending input.
        field: String,
        /// A description of what made the input invalid.
        message: String,
    },

    /// A salary percentage was outside `[0, 100]`.
    #[error("Salary percentage {value} is outside the range [0, 100]")]
    InvalidPercentage {
        /// The rejected percentage.
        value: Decimal,
    },

    /// No fee bracket covers the pool. Only reachable with a malformed
    /// schedule, so callers should treat it as fatal.
    #[error("No fee bracket matches a bonus pool of {pool}")]
    NoMatchingBracket {
        /// The pool that could not be priced.
        pool: Decimal,
    },
}

impl EngineError {
    /// The error for an amount that leaves the range a `Decimal` can hold.
    pub fn overflow(field: &str) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: "overflows the supported decimal range".to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
