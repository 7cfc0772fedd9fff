//! Payment gateway configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Payment gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Gateway checkout API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Merchant server key (authenticates API calls and signs notifications)
    pub server_key: Secret<String>,

    /// Hours a pending transaction stays payable
    #[serde(default = "default_expiry_hours")]
    pub expiry_hours: u64,
}

impl PaymentConfig {
    /// Validate payment configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.server_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT_SERVER_KEY"));
        }
        if *environment == Environment::Production && !self.base_url.starts_with("https://") {
            return Err(ValidationError::GatewayMustBeHttps);
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://app.sandbox.gateway.example.com".to_string()
}

fn default_expiry_hours() -> u64 {
    24
}
