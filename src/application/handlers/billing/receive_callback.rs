//! ReceiveCallbackHandler - HTTP-side webhook receipt.
//!
//! Verifies the notification signature, records it for idempotency and
//! enqueues the callback-processing job. The heavy lifting (status
//! reconciliation, purchase granting) happens in the worker so the gateway
//! gets its 200 quickly and redeliveries are absorbed by the idempotency
//! store.
//!
//! ## Race Condition Handling
//!
//! When the gateway delivers the same notification twice concurrently, the
//! first save wins (database PRIMARY KEY constraint); the loser observes
//! `AlreadyExists` and acknowledges without enqueueing a second job.

use std::sync::Arc;

use serde_json::json;

use crate::domain::billing::{BillingError, NotificationVerifier};
use crate::ports::{
    JobKind, JobQueue, QueuedJob, SaveResult, TransactionRepository, WebhookEventRecord,
    WebhookEventRepository, WebhookResult,
};

/// Command carrying the raw webhook body.
#[derive(Debug, Clone)]
pub struct ReceiveCallbackCommand {
    pub payload: Vec<u8>,
}

/// Handler for webhook receipt.
pub struct ReceiveCallbackHandler {
    verifier: Arc<NotificationVerifier>,
    transactions: Arc<dyn TransactionRepository>,
    webhook_events: Arc<dyn WebhookEventRepository>,
    job_queue: Arc<dyn JobQueue>,
    job_max_attempts: u32,
}

impl ReceiveCallbackHandler {
    pub fn new(
        verifier: Arc<NotificationVerifier>,
        transactions: Arc<dyn TransactionRepository>,
        webhook_events: Arc<dyn WebhookEventRepository>,
        job_queue: Arc<dyn JobQueue>,
        job_max_attempts: u32,
    ) -> Self {
        Self {
            verifier,
            transactions,
            webhook_events,
            job_queue,
            job_max_attempts,
        }
    }

    pub async fn handle(
        &self,
        cmd: ReceiveCallbackCommand,
    ) -> Result<WebhookResult, BillingError> {
        // 1. Verify signature and parse. An invalid signature is a hard 401;
        //    nothing is recorded.
        let notification = self.verifier.verify_and_parse(&cmd.payload)?;
        let event_key = notification.idempotency_key();
        let payload_json = serde_json::to_value(&notification)
            .map_err(|e| BillingError::infrastructure(e.to_string()))?;

        // 2. Cheap idempotency pre-check; the save below still decides races.
        if self.webhook_events.find_by_key(&event_key).await?.is_some() {
            return Ok(WebhookResult::AlreadyProcessed);
        }

        // 3. Notifications for unknown orders are acknowledged but ignored.
        //    The gateway retries on non-2xx, and an order we never issued
        //    will not appear by retrying.
        let known_order = self
            .transactions
            .find_by_order_ref(&notification.order_id)
            .await
            .map_err(|e| BillingError::infrastructure(e.to_string()))?
            .is_some();

        if !known_order {
            tracing::warn!(
                order_id = %notification.order_id,
                transaction_status = %notification.transaction_status,
                "notification for unknown order acknowledged and ignored"
            );
            let record = WebhookEventRecord::ignored(
                &event_key,
                &notification.order_id,
                payload_json,
            );
            return match self.webhook_events.save(record).await? {
                SaveResult::Inserted => Ok(WebhookResult::Processed),
                SaveResult::AlreadyExists => Ok(WebhookResult::AlreadyProcessed),
            };
        }

        // 4. First writer wins; the winner enqueues the processing job.
        let record = WebhookEventRecord::accepted(
            &event_key,
            &notification.order_id,
            payload_json.clone(),
        );
        match self.webhook_events.save(record).await? {
            SaveResult::Inserted => {
                let job = QueuedJob::new(
                    JobKind::ProcessPaymentCallback,
                    json!({ "notification": payload_json }),
                    self.job_max_attempts,
                );
                self.job_queue
                    .enqueue(job)
                    .await
                    .map_err(|e| BillingError::infrastructure(e.to_string()))?;

                tracing::info!(
                    order_id = %notification.order_id,
                    transaction_status = %notification.transaction_status,
                    "payment notification accepted"
                );
                Ok(WebhookResult::Processed)
            }
            SaveResult::AlreadyExists => Ok(WebhookResult::AlreadyProcessed),
        }
    }
}
