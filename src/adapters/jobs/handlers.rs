//! Job handler implementations for the worker.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::handlers::billing::ApplyCallbackHandler;
use crate::domain::billing::GatewayNotification;
use crate::domain::foundation::UserId;
use crate::ports::{EmailMessage, JobKind, Mailer, ProfileRepository, QueuedJob};

use super::worker::{JobError, JobHandler};

/// Applies a verified gateway notification to its transaction.
pub struct ProcessCallbackJob {
    handler: Arc<ApplyCallbackHandler>,
}

impl ProcessCallbackJob {
    pub fn new(handler: Arc<ApplyCallbackHandler>) -> Self {
        Self { handler }
    }
}

#[async_trait]
impl JobHandler for ProcessCallbackJob {
    fn kind(&self) -> JobKind {
        JobKind::ProcessPaymentCallback
    }

    async fn execute(&self, job: &QueuedJob) -> Result<(), JobError> {
        let notification: GatewayNotification =
            serde_json::from_value(job.payload["notification"].clone())
                .map_err(|e| JobError::new(format!("malformed callback payload: {}", e)))?;

        self.handler
            .handle(&notification)
            .await
            .map_err(|e| JobError::new(e.to_string()))?;
        Ok(())
    }
}

/// Sends the payment confirmation email for a paid transaction.
pub struct PaymentConfirmationJob {
    mailer: Arc<dyn Mailer>,
}

impl PaymentConfirmationJob {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }
}

#[async_trait]
impl JobHandler for PaymentConfirmationJob {
    fn kind(&self) -> JobKind {
        JobKind::SendPaymentConfirmation
    }

    async fn execute(&self, job: &QueuedJob) -> Result<(), JobError> {
        let email = job.payload["email"]
            .as_str()
            .ok_or_else(|| JobError::new("confirmation payload missing email"))?;
        let order_ref = job.payload["order_ref"]
            .as_str()
            .ok_or_else(|| JobError::new("confirmation payload missing order_ref"))?;
        let amount = job.payload["amount"].as_i64().unwrap_or(0);

        let message = EmailMessage::new(
            email,
            format!("Payment received for order {}", order_ref),
            format!(
                "We received your payment of {} for order {}. \
                 Your purchase is now active - happy learning!",
                amount, order_ref
            ),
        );
        self.mailer
            .send(message)
            .await
            .map_err(|e| JobError::new(e.to_string()))?;
        Ok(())
    }
}

/// Reminds a student that a progress report is due.
pub struct ReportReminderJob {
    mailer: Arc<dyn Mailer>,
    profiles: Arc<dyn ProfileRepository>,
}

impl ReportReminderJob {
    pub fn new(mailer: Arc<dyn Mailer>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { mailer, profiles }
    }
}

#[async_trait]
impl JobHandler for ReportReminderJob {
    fn kind(&self) -> JobKind {
        JobKind::SendReportReminder
    }

    async fn execute(&self, job: &QueuedJob) -> Result<(), JobError> {
        let user_id: UserId = job.payload["user_id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| JobError::new("reminder payload missing user_id"))?;

        let profile = self
            .profiles
            .find_by_user(&user_id)
            .await
            .map_err(|e| JobError::new(e.to_string()))?;

        let Some(email) = profile.and_then(|p| p.email) else {
            // No address on file; nothing to deliver.
            tracing::warn!(user_id = %user_id, "report reminder skipped: no email on profile");
            return Ok(());
        };

        let message = EmailMessage::new(
            email,
            "Your progress report is due",
            "Your weekly progress report is due. \
             Share what you worked on so your mentor can follow along.",
        );
        self.mailer
            .send(message)
            .await
            .map_err(|e| JobError::new(e.to_string()))?;
        Ok(())
    }
}
