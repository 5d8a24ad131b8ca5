//! Session-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, ValidationError};

/// Session-specific errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// Inbound event failed validation; nothing was applied.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Session was not found.
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    /// Operation not allowed in the session's current state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Report export failed.
    #[error("Export failed: {0}")]
    Export(String),
}

impl SessionError {
    pub fn not_found(id: SessionId) -> Self {
        SessionError::NotFound(id)
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        SessionError::InvalidState(message.into())
    }

    pub fn export(message: impl Into<String>) -> Self {
        SessionError::Export(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::Validation(err) => err.code(),
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            SessionError::Export(_) => ErrorCode::ExportFailed,
        }
    }
}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ExportFailed => SessionError::Export(err.message),
            _ => SessionError::InvalidState(err.to_string()),
        }
    }
}

impl From<SessionError> for DomainError {
    fn from(err: SessionError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
