//! Mentoring-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, MentoringSessionId};

/// Errors raised by mentoring operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MentoringError {
    /// Session was not found.
    NotFound(MentoringSessionId),

    /// Invalid state for the requested operation.
    InvalidState { current: String, attempted: String },

    /// Caller is not allowed to perform the operation.
    Forbidden(String),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl MentoringError {
    pub fn not_found(id: MentoringSessionId) -> Self {
        MentoringError::NotFound(id)
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        MentoringError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        MentoringError::Forbidden(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MentoringError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MentoringError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MentoringError::NotFound(_) => ErrorCode::SessionNotFound,
            MentoringError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            MentoringError::Forbidden(_) => ErrorCode::Forbidden,
            MentoringError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MentoringError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            MentoringError::NotFound(id) => format!("Mentoring session not found: {}", id),
            MentoringError::InvalidState { current, attempted } => {
                format!("Cannot {} session in {} state", attempted, current)
            }
            MentoringError::Forbidden(message) => message.clone(),
            MentoringError::ValidationFailed { field, message } => {
                format!("Validation failed for {}: {}", field, message)
            }
            MentoringError::Infrastructure(message) => message.clone(),
        }
    }
}

impl std::fmt::Display for MentoringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message())
    }
}

impl std::error::Error for MentoringError {}

impl From<DomainError> for MentoringError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => MentoringError::Forbidden(err.message),
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => MentoringError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => MentoringError::Infrastructure(err.to_string()),
        }
    }
}
