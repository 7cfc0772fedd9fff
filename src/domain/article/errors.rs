//! Article-specific error types.

use crate::domain::foundation::{ArticleId, DomainError, ErrorCode};

/// Errors raised by article operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleError {
    /// Article was not found.
    NotFound(ArticleId),

    /// No article with this slug exists.
    NotFoundBySlug(String),

    /// The slug is already taken.
    SlugTaken(String),

    /// Invalid state for the requested operation.
    InvalidState { current: String, attempted: String },

    /// Caller is not allowed to perform the operation.
    Forbidden(String),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl ArticleError {
    pub fn not_found(id: ArticleId) -> Self {
        ArticleError::NotFound(id)
    }

    pub fn not_found_by_slug(slug: impl Into<String>) -> Self {
        ArticleError::NotFoundBySlug(slug.into())
    }

    pub fn slug_taken(slug: impl Into<String>) -> Self {
        ArticleError::SlugTaken(slug.into())
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        ArticleError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ArticleError::Forbidden(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ArticleError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ArticleError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ArticleError::NotFound(_) | ArticleError::NotFoundBySlug(_) => {
                ErrorCode::ArticleNotFound
            }
            ArticleError::SlugTaken(_) => ErrorCode::SlugTaken,
            ArticleError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            ArticleError::Forbidden(_) => ErrorCode::Forbidden,
            ArticleError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ArticleError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            ArticleError::NotFound(id) => format!("Article not found: {}", id),
            ArticleError::NotFoundBySlug(slug) => format!("No article with slug: {}", slug),
            ArticleError::SlugTaken(slug) => format!("Slug '{}' is already taken", slug),
            ArticleError::InvalidState { current, attempted } => {
                format!("Cannot {} article in {} state", attempted, current)
            }
            ArticleError::Forbidden(message) => message.clone(),
            ArticleError::ValidationFailed { field, message } => {
                format!("Validation failed for {}: {}", field, message)
            }
            ArticleError::Infrastructure(message) => message.clone(),
        }
    }
}

impl std::fmt::Display for ArticleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message())
    }
}

impl std::error::Error for ArticleError {}

impl From<DomainError> for ArticleError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => ArticleError::Forbidden(err.message),
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => ArticleError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => ArticleError::Infrastructure(err.to_string()),
        }
    }
}
