//! Token verifier port.
//!
//! Keeps the auth middleware provider-agnostic: whether tokens come from the
//! platform's own issuer or a mock in tests, the middleware doesn't change.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Port for validating bearer tokens.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Validates a token and returns the authenticated user.
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_verifier_is_object_safe() {
        fn _accepts_dyn(_verifier: &dyn TokenVerifier) {}
    }
}
