//! Custom error types for pocket-ledger
//!
//! This module defines the error hierarchy for the ledger engine using thiserror
//! for ergonomic error definitions. Validation failures and storage failures
//! share one enum so that every public operation returns a `LedgerResult`.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Text could not be parsed into the expected shape
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A parsed value violates a sign, zero or min/max constraint
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// A date later than today where future dates are disallowed
    #[error("Future dates are not allowed: {}", .0.format("%d-%m-%Y"))]
    FutureDateNotAllowed(NaiveDate),

    /// A date range whose start is after its end
    #[error(
        "Invalid date range: start {} is after end {}",
        .start.format("%d-%m-%Y"),
        .end.format("%d-%m-%Y")
    )]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Transaction kind was neither income nor expense
    #[error("Invalid transaction type '{0}': use 'income' or 'expense'")]
    InvalidTransactionType(String),

    /// An amount that must be strictly positive was not
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A required text field was empty after trimming
    #[error("The {0} cannot be empty")]
    EmptyField(&'static str),

    /// Transaction index outside the store
    #[error("Transaction index {index} is out of range (ledger holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Goal target date earlier than today
    #[error("Goal target date {} is in the past", .0.format("%d-%m-%Y"))]
    PastTargetDate(NaiveDate),

    /// Goal name not present
    #[error("Goal not found: {0}")]
    GoalNotFound(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Persisted data failed its integrity check
    #[error("Integrity check failed: {0}")]
    Integrity(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create a "not found" error for backups
    pub fn backup_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::GoalNotFound(_))
    }

    /// Check if this error came from input validation rather than I/O or integrity
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidFormat(_)
                | Self::OutOfRange(_)
                | Self::FutureDateNotAllowed(_)
                | Self::InvalidRange { .. }
                | Self::InvalidTransactionType(_)
                | Self::InvalidAmount(_)
                | Self::EmptyField(_)
                | Self::IndexOutOfRange { .. }
                | Self::PastTargetDate(_)
                | Self::GoalNotFound(_)
        )
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_date_errors_use_ledger_date_format() {
        let date = NaiveDate::from_ymd_opt(2030, 1, 5).unwrap();
        let err = LedgerError::FutureDateNotAllowed(date);
        assert_eq!(err.to_string(), "Future dates are not allowed: 05-01-2030");

        let err = LedgerError::InvalidRange {
            start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date range: start 01-03-2024 is after end 01-02-2024"
        );
    }

    #[test]
    fn test_index_out_of_range_display() {
        let err = LedgerError::IndexOutOfRange { index: 7, len: 3 };
        assert_eq!(
            err.to_string(),
            "Transaction index 7 is out of range (ledger holds 3)"
        );
    }

    #[test]
    fn test_classification() {
        assert!(LedgerError::EmptyField("description").is_validation());
        assert!(LedgerError::GoalNotFound("Car".into()).is_validation());
        assert!(LedgerError::GoalNotFound("Car".into()).is_not_found());
        assert!(!LedgerError::Io("disk".into()).is_validation());
        assert!(LedgerError::backup_not_found("ledger.dat.bak").is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ledger_err: LedgerError = io_err.into();
        assert!(matches!(ledger_err, LedgerError::Io(_)));
    }
}
