//! Payment gateway webhook notification.
//!
//! The gateway posts an asynchronous JSON callback reporting the payment
//! outcome for an order. This module owns the typed representation and its
//! parsing; signature verification lives in [`super::signature`].

use serde::{Deserialize, Serialize};

use super::WebhookError;

/// Parsed webhook notification body.
///
/// Field names follow the gateway wire format. Amounts arrive as decimal
/// strings (e.g. `"150000.00"`) and are kept verbatim: the signature is
/// computed over the raw string, and parsing them to numbers would lose the
/// formatting the digest depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayNotification {
    /// Order reference issued at checkout.
    pub order_id: String,

    /// Gateway payment status (`capture`, `settlement`, `pending`, ...).
    pub transaction_status: String,

    /// Fraud check verdict for card captures (`accept`, `challenge`, `deny`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fraud_status: Option<String>,

    /// Gateway status code (e.g. `"200"`).
    pub status_code: String,

    /// Gross amount as a decimal string.
    pub gross_amount: String,

    /// Gateway-side transaction identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,

    /// Payment channel (`bank_transfer`, `credit_card`, `qris`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<String>,

    /// SHA-512 signature over order_id + status_code + gross_amount + server key.
    pub signature_key: String,
}

impl GatewayNotification {
    /// Parses a notification from the raw webhook body.
    pub fn from_payload(payload: &[u8]) -> Result<Self, WebhookError> {
        serde_json::from_slice(payload).map_err(|e| WebhookError::ParseError(e.to_string()))
    }

    /// Deduplication key for this notification.
    ///
    /// The gateway does not send an event id, so duplicates are detected by
    /// the (order, status, code) triple: a redelivery of the same outcome
    /// carries the same triple, while a genuine status progression changes it.
    pub fn idempotency_key(&self) -> String {
        format!(
            "{}:{}:{}",
            self.order_id, self.transaction_status, self.status_code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_payload() -> Vec<u8> {
        serde_json::to_vec(&json!({
            "order_id": "LF-20260801-0001",
            "transaction_status": "settlement",
            "status_code": "200",
            "gross_amount": "150000.00",
            "transaction_id": "9aed5972-5b6a-401e-894b-a32c91ed1a3a",
            "payment_type": "bank_transfer",
            "signature_key": "abc123"
        }))
        .unwrap()
    }

    #[test]
    fn parses_complete_notification() {
        let n = GatewayNotification::from_payload(&sample_payload()).unwrap();

        assert_eq!(n.order_id, "LF-20260801-0001");
        assert_eq!(n.transaction_status, "settlement");
        assert_eq!(n.fraud_status, None);
        assert_eq!(n.gross_amount, "150000.00");
        assert_eq!(n.payment_type.as_deref(), Some("bank_transfer"));
    }

    #[test]
    fn parses_capture_with_fraud_status() {
        let payload = serde_json::to_vec(&json!({
            "order_id": "LF-1",
            "transaction_status": "capture",
            "fraud_status": "accept",
            "status_code": "200",
            "gross_amount": "99000.00",
            "signature_key": "sig"
        }))
        .unwrap();

        let n = GatewayNotification::from_payload(&payload).unwrap();
        assert_eq!(n.fraud_status.as_deref(), Some("accept"));
    }

    #[test]
    fn rejects_payload_missing_required_fields() {
        let payload = serde_json::to_vec(&json!({
            "order_id": "LF-1",
            "transaction_status": "settlement"
        }))
        .unwrap();

        let result = GatewayNotification::from_payload(&payload);
        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    #[test]
    fn rejects_non_json_payload() {
        let result = GatewayNotification::from_payload(b"not json at all");
        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    #[test]
    fn idempotency_key_combines_order_status_and_code() {
        let n = GatewayNotification::from_payload(&sample_payload()).unwrap();
        assert_eq!(n.idempotency_key(), "LF-20260801-0001:settlement:200");
    }

    #[test]
    fn idempotency_key_differs_across_status_progressions() {
        let mut n = GatewayNotification::from_payload(&sample_payload()).unwrap();
        let settled = n.idempotency_key();
        n.transaction_status = "pending".to_string();
        assert_ne!(n.idempotency_key(), settled);
    }
}
