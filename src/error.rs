//! Error types for the paycheck engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while resolving pay periods,
//! loading settings, and reading or writing timesheet records.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the paycheck engine.
///
/// All fallible operations in the engine return this error type. The two
/// configuration variants ([`EngineError::InvalidPeriodLength`] and
/// [`EngineError::InvalidAnchorDate`]) are recoverable: callers substitute a
/// fallback anchor and retry once.
///
/// # Example
///
/// ```
/// use paycheck_engine::error::EngineError;
///
/// let error = EngineError::InvalidPeriodLength { days: 0 };
/// assert_eq!(error.to_string(), "Invalid pay period length: 0 days (must be at least 1)");
/// assert!(error.is_configuration_error());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The pay period length was zero or negative.
    #[error("Invalid pay period length: {days} days (must be at least 1)")]
    InvalidPeriodLength {
        /// The rejected period length.
        days: i64,
    },

    /// The pay period anchor date was missing or could not be parsed.
    #[error("Invalid pay period anchor date: '{value}'")]
    InvalidAnchorDate {
        /// The raw value that failed to parse.
        value: String,
    },

    /// Date arithmetic left the representable calendar range.
    #[error("Date out of range: {message}")]
    DateOutOfRange {
        /// A description of the computation that overflowed.
        message: String,
    },

    /// A daily record contained invalid values.
    #[error("Invalid record for {date}: {message}")]
    InvalidRecord {
        /// The date of the rejected record.
        date: NaiveDate,
        /// A description of what made the record invalid.
        message: String,
    },

    /// A settings field was outside its permitted range.
    #[error("Invalid setting '{field}': {message}")]
    InvalidSettings {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

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

    /// The storage backend failed to read or write.
    #[error("Storage error: {message}")]
    StorageError {
        /// A description of the storage failure.
        message: String,
    },
}

impl EngineError {
    /// Returns true for errors caused by a bad anchor date or period length.
    ///
    /// These are the errors a caller may recover from by substituting a
    /// fallback anchor (typically today) and retrying once.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidPeriodLength { .. } | EngineError::InvalidAnchorDate { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
