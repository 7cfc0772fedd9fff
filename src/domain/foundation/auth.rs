//! Authentication context shared between the HTTP layer and handlers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Role, UserId};

/// The authenticated caller, as established by the auth middleware.
///
/// Injected into request extensions after token validation and read by the
/// `RequireAuth` extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Subject of the auth token.
    pub user_id: UserId,

    /// Role claim of the auth token.
    pub role: Role,

    /// Email claim, used for payment receipts and notifications.
    pub email: String,
}

/// Errors raised during token validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Token has expired")]
    TokenExpired,

    #[error("Token is invalid")]
    InvalidToken,

    #[error("Token is missing a required claim: {0}")]
    MissingClaim(&'static str),

    #[error("Authentication service unavailable: {0}")]
    ServiceUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn authenticated_user_serializes_role_as_snake_case() {
        let user = AuthenticatedUser {
            user_id: UserId::from_uuid(Uuid::new_v4()),
            role: Role::Mentor,
            email: "mentor@example.com".to_string(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"mentor\""));
    }

    #[test]
    fn auth_error_displays_message() {
        assert_eq!(format!("{}", AuthError::TokenExpired), "Token has expired");
        assert_eq!(
            format!("{}", AuthError::MissingClaim("sub")),
            "Token is missing a required claim: sub"
        );
    }
}
