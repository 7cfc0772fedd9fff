//! Profile-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Errors raised by profile and achievement operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// Profile was not found.
    NotFound(UserId),

    /// The achievement was already awarded to this user.
    DuplicateAchievement { user_id: UserId, kind: String },

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl ProfileError {
    pub fn not_found(user_id: UserId) -> Self {
        ProfileError::NotFound(user_id)
    }

    pub fn duplicate_achievement(user_id: UserId, kind: impl Into<String>) -> Self {
        ProfileError::DuplicateAchievement {
            user_id,
            kind: kind.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ProfileError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ProfileError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ProfileError::NotFound(_) => ErrorCode::ProfileNotFound,
            ProfileError::DuplicateAchievement { .. } => ErrorCode::DuplicateAchievement,
            ProfileError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ProfileError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            ProfileError::NotFound(user_id) => format!("Profile not found for user: {}", user_id),
            ProfileError::DuplicateAchievement { user_id, kind } => {
                format!("User {} already holds achievement {}", user_id, kind)
            }
            ProfileError::ValidationFailed { field, message } => {
                format!("Validation failed for {}: {}", field, message)
            }
            ProfileError::Infrastructure(message) => message.clone(),
        }
    }
}

impl std::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message())
    }
}

impl std::error::Error for ProfileError {}

impl From<DomainError> for ProfileError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => ProfileError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => ProfileError::Infrastructure(err.to_string()),
        }
    }
}
