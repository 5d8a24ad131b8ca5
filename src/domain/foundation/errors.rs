//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors raised while validating an inbound event or value object.
///
/// All of these are integration errors: the offending event is rejected
/// before any session state is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Unrecognized emotion label '{0}'")]
    InvalidLabel(String),

    #[error("Unknown task domain '{0}'")]
    UnknownDomain(String),

    #[error("Difficulty tier must be between 1 and 3, got {0}")]
    InvalidDifficultyTier(i64),

    #[error("Unknown game '{0}'")]
    UnknownGame(String),

    #[error("Unrecognized grade '{0}'")]
    InvalidGrade(String),

    #[error("Latency must be a finite, non-negative number of seconds, got {0}")]
    InvalidLatency(f64),

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },
}

impl ValidationError {
    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Returns the error code for this validation failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::InvalidLabel(_) => ErrorCode::InvalidLabel,
            ValidationError::UnknownDomain(_) => ErrorCode::UnknownDomain,
            ValidationError::InvalidDifficultyTier(_) => ErrorCode::InvalidDifficultyTier,
            ValidationError::UnknownGame(_) => ErrorCode::UnknownGame,
            ValidationError::InvalidGrade(_) => ErrorCode::InvalidGrade,
            ValidationError::InvalidLatency(_) => ErrorCode::InvalidLatency,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    InvalidLabel,
    UnknownDomain,
    InvalidDifficultyTier,
    UnknownGame,
    InvalidGrade,
    InvalidLatency,
    OutOfRange,

    // Not found errors
    SessionNotFound,

    // State errors
    InvalidStateTransition,

    // Infrastructure errors
    ExportFailed,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidLabel => "INVALID_LABEL",
            ErrorCode::UnknownDomain => "UNKNOWN_DOMAIN",
            ErrorCode::InvalidDifficultyTier => "INVALID_DIFFICULTY_TIER",
            ErrorCode::UnknownGame => "UNKNOWN_GAME",
            ErrorCode::InvalidGrade => "INVALID_GRADE",
            ErrorCode::InvalidLatency => "INVALID_LATENCY",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::ExportFailed => "EXPORT_FAILED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
