//! Mailer port for outbound notification email.

use async_trait::async_trait;
use thiserror::Error;

/// An outbound email message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Errors returned by the mailer adapter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MailerError {
    #[error("Mail provider rejected the message: {0}")]
    Rejected(String),

    #[error("Mail request failed: {0}")]
    RequestFailed(String),
}

/// Port for sending notification email.
///
/// Delivery goes through the job queue, so implementations may fail
/// transiently; the worker retries with its bounded policy.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends one message.
    async fn send(&self, message: EmailMessage) -> Result<(), MailerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailer_is_object_safe() {
        fn _accepts_dyn(_mailer: &dyn Mailer) {}
    }
}
