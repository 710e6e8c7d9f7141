//! # Error Types
//!
//! Structured error types for power_core. Every failure a client can see is
//! one of three kinds: the input was rejected before computation
//! ([`ErrorKind::Validation`]), a formula hit a numeric degeneracy
//! ([`ErrorKind::Computation`]), or the requested calculator does not exist
//! ([`ErrorKind::NotFound`]).
//!
//! ## Example
//!
//! ```rust
//! use power_core::errors::{CalcError, CalcResult, ErrorKind};
//!
//! fn validate_voltage(unom_kv: f64) -> CalcResult<()> {
//!     if unom_kv <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "Unom",
//!             unom_kv.to_string(),
//!             "Voltage must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! let err = validate_voltage(0.0).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Validation);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for power_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Broad classification of a [`CalcError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input rejected before any computation started
    Validation,
    /// A derived quantity became undefined mid-formula
    Computation,
    /// Unknown calculator identifier
    NotFound,
    /// Serialization or other internal failure
    Internal,
}

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// An input value is invalid (empty, non-numeric, out of range)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Components that must add up to a fixed total do not
    #[error("Sum of {fields} must be {target}%, got {sum}")]
    ClosureSum {
        fields: String,
        sum: f64,
        target: f64,
    },

    /// A categorical selector does not name a known variant
    #[error("Unknown value for '{field}': {value}")]
    UnknownCategory { field: String, value: String },

    /// A formula produced an undefined result (division by zero, sqrt of a negative)
    #[error("Computation failed for {quantity}: {reason}")]
    ComputationFailed { quantity: String, reason: String },

    /// No calculator registered under the identifier
    #[error("Calculator not found: project {project}, calculator '{slug}'")]
    CalculatorNotFound { project: u8, slug: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a ClosureSum error
    pub fn closure_sum(fields: &[&str], sum: f64, target: f64) -> Self {
        CalcError::ClosureSum {
            fields: fields.join(" + "),
            sum,
            target,
        }
    }

    /// Create an UnknownCategory error
    pub fn unknown_category(field: impl Into<String>, value: impl Into<String>) -> Self {
        CalcError::UnknownCategory {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a ComputationFailed error
    pub fn computation_failed(quantity: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ComputationFailed {
            quantity: quantity.into(),
            reason: reason.into(),
        }
    }

    /// Create a CalculatorNotFound error
    pub fn calculator_not_found(project: u8, slug: impl Into<String>) -> Self {
        CalcError::CalculatorNotFound {
            project,
            slug: slug.into(),
        }
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::MissingField { .. }
            | CalcError::InvalidInput { .. }
            | CalcError::ClosureSum { .. }
            | CalcError::UnknownCategory { .. } => ErrorKind::Validation,
            CalcError::ComputationFailed { .. } => ErrorKind::Computation,
            CalcError::CalculatorNotFound { .. } => ErrorKind::NotFound,
            CalcError::SerializationError { .. } => ErrorKind::Internal,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::ClosureSum { .. } => "CLOSURE_SUM",
            CalcError::UnknownCategory { .. } => "UNKNOWN_CATEGORY",
            CalcError::ComputationFailed { .. } => "COMPUTATION_FAILED",
            CalcError::CalculatorNotFound { .. } => "CALCULATOR_NOT_FOUND",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
