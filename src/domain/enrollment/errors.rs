//! Enrollment-specific error types.

use crate::domain::foundation::{CourseId, DomainError, EnrollmentId, ErrorCode, UserId};

/// Errors raised by enrollment operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentError {
    /// Enrollment was not found.
    NotFound(EnrollmentId),

    /// The user is already enrolled in this course.
    AlreadyEnrolled { user_id: UserId, course_id: CourseId },

    /// The course is not open for enrollment.
    CourseNotAvailable(CourseId),

    /// Enrollment requires payment or a scholarship grant.
    PaymentRequired(CourseId),

    /// Invalid state for the requested operation.
    InvalidState { current: String, attempted: String },

    /// Caller is not allowed to perform the operation.
    Forbidden(String),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl EnrollmentError {
    pub fn not_found(id: EnrollmentId) -> Self {
        EnrollmentError::NotFound(id)
    }

    pub fn already_enrolled(user_id: UserId, course_id: CourseId) -> Self {
        EnrollmentError::AlreadyEnrolled { user_id, course_id }
    }

    pub fn course_not_available(course_id: CourseId) -> Self {
        EnrollmentError::CourseNotAvailable(course_id)
    }

    pub fn payment_required(course_id: CourseId) -> Self {
        EnrollmentError::PaymentRequired(course_id)
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        EnrollmentError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        EnrollmentError::Forbidden(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EnrollmentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        EnrollmentError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EnrollmentError::NotFound(_) => ErrorCode::EnrollmentNotFound,
            EnrollmentError::AlreadyEnrolled { .. } => ErrorCode::AlreadyEnrolled,
            EnrollmentError::CourseNotAvailable(_) => ErrorCode::CourseNotPublished,
            EnrollmentError::PaymentRequired(_) => ErrorCode::CourseNotPublished,
            EnrollmentError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            EnrollmentError::Forbidden(_) => ErrorCode::Forbidden,
            EnrollmentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            EnrollmentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            EnrollmentError::NotFound(id) => format!("Enrollment not found: {}", id),
            EnrollmentError::AlreadyEnrolled { user_id, course_id } => {
                format!("User {} is already enrolled in course {}", user_id, course_id)
            }
            EnrollmentError::CourseNotAvailable(id) => {
                format!("Course {} is not open for enrollment", id)
            }
            EnrollmentError::PaymentRequired(id) => {
                format!("Course {} requires payment or a scholarship", id)
            }
            EnrollmentError::InvalidState { current, attempted } => {
                format!("Cannot {} enrollment in {} state", attempted, current)
            }
            EnrollmentError::Forbidden(message) => message.clone(),
            EnrollmentError::ValidationFailed { field, message } => {
                format!("Validation failed for {}: {}", field, message)
            }
            EnrollmentError::Infrastructure(message) => message.clone(),
        }
    }
}

impl std::fmt::Display for EnrollmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message())
    }
}

impl std::error::Error for EnrollmentError {}

impl From<DomainError> for EnrollmentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => EnrollmentError::Forbidden(err.message),
            ErrorCode::InvalidStateTransition => EnrollmentError::InvalidState {
                current: "unknown".to_string(),
                attempted: err.message,
            },
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => EnrollmentError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => EnrollmentError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_expected_variants() {
        assert_eq!(
            EnrollmentError::not_found(EnrollmentId::new()).code(),
            ErrorCode::EnrollmentNotFound
        );
        assert_eq!(
            EnrollmentError::already_enrolled(UserId::new(), CourseId::new()).code(),
            ErrorCode::AlreadyEnrolled
        );
    }
}
