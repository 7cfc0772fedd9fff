//! Scholarship-specific error types.

use crate::domain::foundation::{ApplicationId, DomainError, ErrorCode, ScholarshipId};

/// Errors raised by scholarship operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScholarshipError {
    /// Scholarship program was not found.
    NotFound(ScholarshipId),

    /// Application was not found.
    ApplicationNotFound(ApplicationId),

    /// The user already applied to this program.
    AlreadyApplied(ScholarshipId),

    /// Program is closed or outside its application window.
    Closed(ScholarshipId),

    /// Program quota has been exhausted.
    QuotaExhausted(ScholarshipId),

    /// Invalid state for the requested operation.
    InvalidState { current: String, attempted: String },

    /// Caller is not allowed to perform the operation.
    Forbidden(String),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl ScholarshipError {
    pub fn not_found(id: ScholarshipId) -> Self {
        ScholarshipError::NotFound(id)
    }

    pub fn application_not_found(id: ApplicationId) -> Self {
        ScholarshipError::ApplicationNotFound(id)
    }

    pub fn already_applied(id: ScholarshipId) -> Self {
        ScholarshipError::AlreadyApplied(id)
    }

    pub fn closed(id: ScholarshipId) -> Self {
        ScholarshipError::Closed(id)
    }

    pub fn quota_exhausted(id: ScholarshipId) -> Self {
        ScholarshipError::QuotaExhausted(id)
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        ScholarshipError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ScholarshipError::Forbidden(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ScholarshipError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ScholarshipError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ScholarshipError::NotFound(_) => ErrorCode::ScholarshipNotFound,
            ScholarshipError::ApplicationNotFound(_) => ErrorCode::ApplicationNotFound,
            ScholarshipError::AlreadyApplied(_) => ErrorCode::AlreadyApplied,
            ScholarshipError::Closed(_) => ErrorCode::ScholarshipClosed,
            ScholarshipError::QuotaExhausted(_) => ErrorCode::QuotaExhausted,
            ScholarshipError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            ScholarshipError::Forbidden(_) => ErrorCode::Forbidden,
            ScholarshipError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ScholarshipError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            ScholarshipError::NotFound(id) => format!("Scholarship not found: {}", id),
            ScholarshipError::ApplicationNotFound(id) => {
                format!("Application not found: {}", id)
            }
            ScholarshipError::AlreadyApplied(id) => {
                format!("User already applied to scholarship {}", id)
            }
            ScholarshipError::Closed(id) => {
                format!("Scholarship {} is not accepting applications", id)
            }
            ScholarshipError::QuotaExhausted(id) => {
                format!("Scholarship {} quota has been exhausted", id)
            }
            ScholarshipError::InvalidState { current, attempted } => {
                format!("Cannot {} application in {} state", attempted, current)
            }
            ScholarshipError::Forbidden(message) => message.clone(),
            ScholarshipError::ValidationFailed { field, message } => {
                format!("Validation failed for {}: {}", field, message)
            }
            ScholarshipError::Infrastructure(message) => message.clone(),
        }
    }
}

impl std::fmt::Display for ScholarshipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message())
    }
}

impl std::error::Error for ScholarshipError {}

impl From<DomainError> for ScholarshipError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => ScholarshipError::Forbidden(err.message),
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => ScholarshipError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => ScholarshipError::Infrastructure(err.to_string()),
        }
    }
}
