//! Email configuration (HTTP mail API)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Email configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Mail API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Mail API key
    pub api_key: Secret<String>,

    /// From address for outbound notifications
    #[serde(default = "default_from")]
    pub from_address: String,
}

impl EmailConfig {
    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("EMAIL_API_KEY"));
        }
        if !self.from_address.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://api.mail.example.com".to_string()
}

fn default_from() -> String {
    "no-reply@learnforge.app".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_requires_api_key() {
        let config = EmailConfig {
            base_url: default_base_url(),
            api_key: Secret::new(String::new()),
            from_address: default_from(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_from_address() {
        let config = EmailConfig {
            base_url: default_base_url(),
            api_key: Secret::new("key".to_string()),
            from_address: "not-an-email".to_string(),
        };
        assert!(config.validate().is_err());
    }
}
