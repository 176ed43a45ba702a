//! Error codes for the pickem backend API.
//!
//! Every code that can appear in a problem-details body is listed here.
//! Add new codes here; never pass ad-hoc strings as error codes.

use core::fmt;

/// Canonical SCREAMING_SNAKE_CASE error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Declared winner is empty or not one of the event's options
    InvalidOutcome,
    /// Required query parameter missing
    MissingParameter,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Event not found
    EventNotFound,
    /// General not found error
    NotFound,

    // System Errors
    /// Settlement transaction failed and was rolled back
    TransactionFailure,
    DbError,
    DbUnavailable,
    DbTimeout,
    Internal,
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidOutcome => "INVALID_OUTCOME",
            Self::MissingParameter => "MISSING_PARAMETER",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::EventNotFound => "EVENT_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::TransactionFailure => "TRANSACTION_FAILURE",
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// All codes, used to check uniqueness of the wire strings.
    pub const ALL: &'static [ErrorCode] = &[
        Self::InvalidOutcome,
        Self::MissingParameter,
        Self::ValidationError,
        Self::BadRequest,
        Self::EventNotFound,
        Self::NotFound,
        Self::TransactionFailure,
        Self::DbError,
        Self::DbUnavailable,
        Self::DbTimeout,
        Self::Internal,
        Self::ConfigError,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
