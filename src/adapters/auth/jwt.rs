//! JWT token verifier.
//!
//! Validates HS256 bearer tokens issued by the platform's auth service and
//! maps the claims into an [`AuthenticatedUser`].

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, Role, UserId};
use crate::ports::TokenVerifier;

/// Claims expected in a platform token.
#[derive(Debug, Deserialize)]
struct Claims {
    /// Subject: the user's UUID.
    sub: String,
    /// Role claim: student, mentor or admin.
    role: String,
    /// Contact email.
    email: String,
    /// Expiry, validated by the jsonwebtoken crate.
    #[allow(dead_code)]
    exp: u64,
}

/// Verifier for platform-issued HS256 tokens.
pub struct JwtTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    /// Builds a verifier from the auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.clone()]);
        validation.leeway = config.leeway_secs;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl TokenVerifier for JwtTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        let user_id: UserId = data
            .claims
            .sub
            .parse()
            .map_err(|_| AuthError::MissingClaim("sub"))?;
        let role: Role = data
            .claims
            .role
            .parse()
            .map_err(|_| AuthError::MissingClaim("role"))?;

        Ok(AuthenticatedUser {
            user_id,
            role,
            email: data.claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use secrecy::Secret;
    use serde::Serialize;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[derive(Serialize)]
    struct TestClaims<'a> {
        sub: &'a str,
        role: &'a str,
        email: &'a str,
        iss: &'a str,
        exp: u64,
    }

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: Secret::new(SECRET.to_string()),
            issuer: "learnforge".to_string(),
            leeway_secs: 30,
        }
    }

    fn sign(claims: &TestClaims<'_>, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn future_exp() -> u64 {
        (chrono::Utc::now().timestamp() as u64) + 3600
    }

    #[tokio::test]
    async fn valid_token_yields_authenticated_user() {
        let verifier = JwtTokenVerifier::new(&config());
        let sub = uuid::Uuid::new_v4().to_string();
        let token = sign(
            &TestClaims {
                sub: &sub,
                role: "mentor",
                email: "mentor@example.com",
                iss: "learnforge",
                exp: future_exp(),
            },
            SECRET,
        );

        let user = verifier.verify(&token).await.unwrap();
        assert_eq!(user.user_id.to_string(), sub);
        assert_eq!(user.role, Role::Mentor);
        assert_eq!(user.email, "mentor@example.com");
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let verifier = JwtTokenVerifier::new(&config());
        let sub = uuid::Uuid::new_v4().to_string();
        let token = sign(
            &TestClaims {
                sub: &sub,
                role: "student",
                email: "s@example.com",
                iss: "learnforge",
                exp: 1_000_000, // long past, outside leeway
            },
            SECRET,
        );

        let err = verifier.verify(&token).await.unwrap_err();
        assert_eq!(err, AuthError::TokenExpired);
    }

    #[tokio::test]
    async fn wrong_secret_is_invalid() {
        let verifier = JwtTokenVerifier::new(&config());
        let sub = uuid::Uuid::new_v4().to_string();
        let token = sign(
            &TestClaims {
                sub: &sub,
                role: "student",
                email: "s@example.com",
                iss: "learnforge",
                exp: future_exp(),
            },
            "another-secret-another-secret-32b",
        );

        assert_eq!(verifier.verify(&token).await.unwrap_err(), AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn malformed_subject_is_a_missing_claim() {
        let verifier = JwtTokenVerifier::new(&config());
        let token = sign(
            &TestClaims {
                sub: "not-a-uuid",
                role: "student",
                email: "s@example.com",
                iss: "learnforge",
                exp: future_exp(),
            },
            SECRET,
        );

        assert_eq!(
            verifier.verify(&token).await.unwrap_err(),
            AuthError::MissingClaim("sub")
        );
    }

    #[tokio::test]
    async fn unknown_role_is_a_missing_claim() {
        let verifier = JwtTokenVerifier::new(&config());
        let sub = uuid::Uuid::new_v4().to_string();
        let token = sign(
            &TestClaims {
                sub: &sub,
                role: "superuser",
                email: "s@example.com",
                iss: "learnforge",
                exp: future_exp(),
            },
            SECRET,
        );

        assert_eq!(
            verifier.verify(&token).await.unwrap_err(),
            AuthError::MissingClaim("role")
        );
    }
}
