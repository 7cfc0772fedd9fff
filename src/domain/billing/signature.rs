//! Gateway notification signature verification.
//!
//! The gateway signs each notification with a SHA-512 digest over
//! `order_id + status_code + gross_amount + server_key`. Verification
//! recomputes the digest and compares in constant time.

use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;

use super::{GatewayNotification, WebhookError};

/// Verifier for gateway notification signatures.
pub struct NotificationVerifier {
    /// Merchant server key from the gateway dashboard.
    server_key: String,
}

impl NotificationVerifier {
    /// Creates a new verifier with the given server key.
    pub fn new(server_key: impl Into<String>) -> Self {
        Self {
            server_key: server_key.into(),
        }
    }

    /// Verifies the signature carried by a parsed notification.
    ///
    /// # Errors
    ///
    /// - `InvalidSignature` - digest mismatch or malformed hex
    pub fn verify(&self, notification: &GatewayNotification) -> Result<(), WebhookError> {
        let expected = self.compute_digest(
            &notification.order_id,
            &notification.status_code,
            &notification.gross_amount,
        );

        let provided = hex::decode(notification.signature_key.trim())
            .map_err(|_| WebhookError::InvalidSignature)?;

        if expected.ct_eq(provided.as_slice()).into() {
            Ok(())
        } else {
            Err(WebhookError::InvalidSignature)
        }
    }

    /// Parses the raw payload and verifies its signature in one step.
    pub fn verify_and_parse(&self, payload: &[u8]) -> Result<GatewayNotification, WebhookError> {
        let notification = GatewayNotification::from_payload(payload)?;
        self.verify(&notification)?;
        Ok(notification)
    }

    fn compute_digest(&self, order_id: &str, status_code: &str, gross_amount: &str) -> Vec<u8> {
        let mut hasher = Sha512::new();
        hasher.update(order_id.as_bytes());
        hasher.update(status_code.as_bytes());
        hasher.update(gross_amount.as_bytes());
        hasher.update(self.server_key.as_bytes());
        hasher.finalize().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SERVER_KEY: &str = "SB-server-key-for-tests";

    fn sign(order_id: &str, status_code: &str, gross_amount: &str) -> String {
        let mut hasher = Sha512::new();
        hasher.update(order_id.as_bytes());
        hasher.update(status_code.as_bytes());
        hasher.update(gross_amount.as_bytes());
        hasher.update(SERVER_KEY.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn signed_payload(order_id: &str) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "order_id": order_id,
            "transaction_status": "settlement",
            "status_code": "200",
            "gross_amount": "150000.00",
            "signature_key": sign(order_id, "200", "150000.00"),
        }))
        .unwrap()
    }

    #[test]
    fn accepts_correctly_signed_notification() {
        let verifier = NotificationVerifier::new(SERVER_KEY);
        let result = verifier.verify_and_parse(&signed_payload("LF-1"));
        assert!(result.is_ok());
    }

    #[test]
    fn rejects_signature_from_wrong_server_key() {
        let verifier = NotificationVerifier::new("a-different-key");
        let result = verifier.verify_and_parse(&signed_payload("LF-1"));
        assert_eq!(result.unwrap_err(), WebhookError::InvalidSignature);
    }

    #[test]
    fn rejects_tampered_amount() {
        let payload = serde_json::to_vec(&json!({
            "order_id": "LF-1",
            "transaction_status": "settlement",
            "status_code": "200",
            "gross_amount": "1.00",
            "signature_key": sign("LF-1", "200", "150000.00"),
        }))
        .unwrap();

        let verifier = NotificationVerifier::new(SERVER_KEY);
        assert_eq!(
            verifier.verify_and_parse(&payload).unwrap_err(),
            WebhookError::InvalidSignature
        );
    }

    #[test]
    fn rejects_non_hex_signature() {
        let payload = serde_json::to_vec(&json!({
            "order_id": "LF-1",
            "transaction_status": "settlement",
            "status_code": "200",
            "gross_amount": "150000.00",
            "signature_key": "zz-not-hex",
        }))
        .unwrap();

        let verifier = NotificationVerifier::new(SERVER_KEY);
        assert_eq!(
            verifier.verify_and_parse(&payload).unwrap_err(),
            WebhookError::InvalidSignature
        );
    }

    #[test]
    fn rejects_truncated_signature() {
        let mut signature = sign("LF-1", "200", "150000.00");
        signature.truncate(32);
        let payload = serde_json::to_vec(&json!({
            "order_id": "LF-1",
            "transaction_status": "settlement",
            "status_code": "200",
            "gross_amount": "150000.00",
            "signature_key": signature,
        }))
        .unwrap();

        let verifier = NotificationVerifier::new(SERVER_KEY);
        assert_eq!(
            verifier.verify_and_parse(&payload).unwrap_err(),
            WebhookError::InvalidSignature
        );
    }
}
