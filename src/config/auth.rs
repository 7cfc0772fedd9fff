//! Authentication configuration (JWT)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Authentication configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret shared with the token issuer
    pub jwt_secret: Secret<String>,

    /// Expected `iss` claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Accepted clock skew in seconds when validating `exp`
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

impl AuthConfig {
    /// Validate auth configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.jwt_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_JWT_SECRET"));
        }
        if self.jwt_secret.expose_secret().len() < 32 {
            return Err(ValidationError::JwtSecretTooShort);
        }
        Ok(())
    }
}

fn default_issuer() -> String {
    "learnforge".to_string()
}

fn default_leeway() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: Secret::new(secret.to_string()),
            issuer: default_issuer(),
            leeway_secs: default_leeway(),
        }
    }

    #[test]
    fn test_validation_rejects_empty_secret() {
        assert!(config("").validate().is_err());
    }

    #[test]
    fn test_validation_rejects_short_secret() {
        assert!(config("too-short").validate().is_err());
    }

    #[test]
    fn test_validation_accepts_long_secret() {
        assert!(config("0123456789abcdef0123456789abcdef").validate().is_ok());
    }
}
