//! Error types for the Attendance Reconciliation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during reconciliation.

use thiserror::Error;

/// The main error type for the Attendance Reconciliation Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
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

    /// The attendance policy contained inconsistent values.
    #[error("Invalid attendance policy: {message}")]
    InvalidPolicy {
        /// A description of what made the policy invalid.
        message: String,
    },

    /// A time expression on an absence record could not be parsed.
    #[error("Unparseable time expression '{expression}': {message}")]
    TimeExprParse {
        /// The expression that failed to parse.
        expression: String,
        /// A description of the parse error.
        message: String,
    },

    /// The badge-event table held no usable events, so no reporting
    /// period can be derived and no meaningful report is possible.
    #[error("Event log contains no usable badge events")]
    EmptyEventLog,

    /// A general reconciliation error occurred.
    #[error("Reconciliation error: {message}")]
    ReconciliationError {
        /// A description of the reconciliation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
