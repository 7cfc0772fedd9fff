//! Webhook event repository port - gateway notification idempotency.
//!
//! The gateway redelivers notifications on timeouts and retries. Each
//! notification is recorded under its idempotency key before processing;
//! when two deliveries race, the first save wins (database PRIMARY KEY
//! constraint) and the loser is acknowledged without reprocessing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::foundation::{DomainError, Timestamp};

/// Processing disposition recorded for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookDisposition {
    /// Accepted and queued for processing.
    Accepted,

    /// Acknowledged without processing (no matching transaction).
    Ignored,
}

/// Outcome of an idempotent save attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveResult {
    /// This record was inserted; the caller owns processing.
    Inserted,

    /// A record with this key already exists; skip processing.
    AlreadyExists,
}

/// Result of processing a webhook notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookResult {
    /// Notification was accepted for processing.
    Processed,

    /// Notification was already handled (idempotent skip).
    AlreadyProcessed,
}

/// A recorded webhook notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEventRecord {
    /// Idempotency key: order_id + transaction_status + status_code.
    pub event_key: String,

    /// Gateway order reference.
    pub order_id: String,

    /// Disposition decided at receipt time.
    pub disposition: WebhookDisposition,

    /// Raw notification body, kept for manual reconciliation.
    pub payload: JsonValue,

    /// When the notification was recorded.
    pub received_at: Timestamp,
}

impl WebhookEventRecord {
    /// Builds an accepted record.
    pub fn accepted(
        event_key: impl Into<String>,
        order_id: impl Into<String>,
        payload: JsonValue,
    ) -> Self {
        Self {
            event_key: event_key.into(),
            order_id: order_id.into(),
            disposition: WebhookDisposition::Accepted,
            payload,
            received_at: Timestamp::now(),
        }
    }

    /// Builds an ignored record.
    pub fn ignored(
        event_key: impl Into<String>,
        order_id: impl Into<String>,
        payload: JsonValue,
    ) -> Self {
        Self {
            event_key: event_key.into(),
            order_id: order_id.into(),
            disposition: WebhookDisposition::Ignored,
            payload,
            received_at: Timestamp::now(),
        }
    }
}

/// Port for the webhook notification idempotency store.
#[async_trait]
pub trait WebhookEventRepository: Send + Sync {
    /// Find a record by its idempotency key.
    async fn find_by_key(&self, event_key: &str)
        -> Result<Option<WebhookEventRecord>, DomainError>;

    /// Save a record; first writer wins.
    async fn save(&self, record: WebhookEventRecord) -> Result<SaveResult, DomainError>;

    /// Delete records received before the given instant (retention policy).
    async fn delete_before(&self, cutoff: Timestamp) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn webhook_event_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn WebhookEventRepository) {}
    }

    #[test]
    fn accepted_record_carries_payload() {
        let record = WebhookEventRecord::accepted(
            "LF-1:settlement:200",
            "LF-1",
            json!({"transaction_status": "settlement"}),
        );
        assert_eq!(record.disposition, WebhookDisposition::Accepted);
        assert_eq!(record.payload["transaction_status"], "settlement");
    }
}
