//! HTTP mail API adapter.
//!
//! Sends mail through a JSON mail API (single POST per message). Transient
//! failures surface as `MailerError::RequestFailed`; the job worker's retry
//! policy handles redelivery.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

use crate::config::EmailConfig;
use crate::ports::{EmailMessage, Mailer, MailerError};

/// Mailer backed by an HTTP mail API.
pub struct ApiMailer {
    client: reqwest::Client,
    base_url: String,
    api_key: Secret<String>,
    from_address: String,
}

#[derive(Debug, Serialize)]
struct SendMailBody<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl ApiMailer {
    /// Creates a mailer from the email configuration.
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
        }
    }
}

#[async_trait]
impl Mailer for ApiMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), MailerError> {
        let body = SendMailBody {
            from: &self.from_address,
            to: &message.to,
            subject: &message.subject,
            text: &message.body,
        };

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| MailerError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(to = %message.to, subject = %message.subject, "email accepted");
            Ok(())
        } else if status.is_client_error() {
            let detail = response.text().await.unwrap_or_default();
            Err(MailerError::Rejected(format!("{}: {}", status, detail)))
        } else {
            Err(MailerError::RequestFailed(format!(
                "mail API returned {}",
                status
            )))
        }
    }
}
