//! Catalog-specific error types.

use crate::domain::foundation::{CourseId, DomainError, ErrorCode};

/// Errors raised by catalog operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Course was not found.
    NotFound(CourseId),

    /// No course with this slug exists.
    NotFoundBySlug(String),

    /// The slug is already taken by another course.
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

impl CatalogError {
    pub fn not_found(id: CourseId) -> Self {
        CatalogError::NotFound(id)
    }

    pub fn not_found_by_slug(slug: impl Into<String>) -> Self {
        CatalogError::NotFoundBySlug(slug.into())
    }

    pub fn slug_taken(slug: impl Into<String>) -> Self {
        CatalogError::SlugTaken(slug.into())
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        CatalogError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        CatalogError::Forbidden(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CatalogError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::NotFound(_) | CatalogError::NotFoundBySlug(_) => {
                ErrorCode::CourseNotFound
            }
            CatalogError::SlugTaken(_) => ErrorCode::SlugTaken,
            CatalogError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            CatalogError::Forbidden(_) => ErrorCode::Forbidden,
            CatalogError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CatalogError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            CatalogError::NotFound(id) => format!("Course not found: {}", id),
            CatalogError::NotFoundBySlug(slug) => format!("No course with slug: {}", slug),
            CatalogError::SlugTaken(slug) => format!("Slug '{}' is already taken", slug),
            CatalogError::InvalidState { current, attempted } => {
                format!("Cannot {} course in {} state", attempted, current)
            }
            CatalogError::Forbidden(message) => message.clone(),
            CatalogError::ValidationFailed { field, message } => {
                format!("Validation failed for {}: {}", field, message)
            }
            CatalogError::Infrastructure(message) => message.clone(),
        }
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message())
    }
}

impl std::error::Error for CatalogError {}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => CatalogError::Forbidden(err.message),
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => CatalogError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::SlugTaken => {
                CatalogError::SlugTaken(err.details.get("slug").cloned().unwrap_or_default())
            }
            _ => CatalogError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_expected_variants() {
        assert_eq!(
            CatalogError::not_found(CourseId::new()).code(),
            ErrorCode::CourseNotFound
        );
        assert_eq!(CatalogError::slug_taken("rust-101").code(), ErrorCode::SlugTaken);
    }

    #[test]
    fn forbidden_domain_error_converts_to_forbidden() {
        let err: CatalogError =
            DomainError::new(ErrorCode::Forbidden, "User does not own this resource").into();
        assert!(matches!(err, CatalogError::Forbidden(_)));
    }
}
