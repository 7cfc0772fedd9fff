//! API error type mapping domain errors to HTTP responses.

use axum::response::{IntoResponse, Json, Response};
use http::StatusCode;
use serde::Serialize;

use crate::domain::article::ArticleError;
use crate::domain::billing::BillingError;
use crate::domain::catalog::CatalogError;
use crate::domain::enrollment::EnrollmentError;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::mentoring::MentoringError;
use crate::domain::scholarship::ScholarshipError;
use crate::domain::subscription::SubscriptionError;
use crate::domain::user::ProfileError;

/// JSON body returned for every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Error type returned by every HTTP handler.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Builds an error from a domain error code, applying the shared
    /// code-to-status mapping.
    pub fn from_code(code: ErrorCode, message: String) -> Self {
        Self {
            status: status_for(code),
            code: code.to_string(),
            message,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    use ErrorCode::*;
    match code {
        ValidationFailed | EmptyField | OutOfRange | InvalidFormat => StatusCode::BAD_REQUEST,

        CourseNotFound | EnrollmentNotFound | SessionNotFound | ScholarshipNotFound
        | ApplicationNotFound | PlanNotFound | SubscriptionNotFound | TransactionNotFound
        | ArticleNotFound | ProfileNotFound | JobNotFound => StatusCode::NOT_FOUND,

        AlreadyEnrolled | AlreadyApplied | SlugTaken | DuplicateAchievement
        | InvalidStateTransition | TransactionFinal => StatusCode::CONFLICT,

        CourseNotPublished | ScholarshipClosed | QuotaExhausted => {
            StatusCode::UNPROCESSABLE_ENTITY
        }

        Unauthorized | InvalidWebhookSignature => StatusCode::UNAUTHORIZED,
        Forbidden => StatusCode::FORBIDDEN,

        PaymentGatewayError => StatusCode::BAD_GATEWAY,

        DatabaseError | MailerError | InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = %self.code, message = %self.message, "request failed");
        }
        let body = ErrorResponse::new(self.code, self.message);
        (self.status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::from_code(err.code, err.message)
    }
}

macro_rules! api_error_from {
    ($($error:ty),+ $(,)?) => {
        $(
            impl From<$error> for ApiError {
                fn from(err: $error) -> Self {
                    ApiError::from_code(err.code(), err.message())
                }
            }
        )+
    };
}

api_error_from!(
    ArticleError,
    BillingError,
    CatalogError,
    EnrollmentError,
    MentoringError,
    ProfileError,
    ScholarshipError,
    SubscriptionError,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CourseId;

    #[test]
    fn not_found_errors_map_to_404() {
        let err: ApiError = CatalogError::not_found(CourseId::new()).into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, "COURSE_NOT_FOUND");
    }

    #[test]
    fn conflicts_map_to_409() {
        let err: ApiError = CatalogError::slug_taken("rust-101").into();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[test]
    fn webhook_signature_maps_to_401() {
        let err: ApiError = BillingError::invalid_webhook_signature().into();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn gateway_failures_map_to_502() {
        let err: ApiError = BillingError::gateway_failed("timeout").into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let err: ApiError = EnrollmentError::forbidden("not yours").into();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }
}
