//! Payment gateway port.
//!
//! Abstracts the third-party gateway's checkout API. Notification
//! verification is a pure domain concern (`domain::billing::NotificationVerifier`)
//! and does not go through this port.

use async_trait::async_trait;
use thiserror::Error;

/// Request to open a payment session for a pending transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePaymentRequest {
    /// Order reference the gateway will report back in notifications.
    pub order_ref: String,

    /// Gross amount in minor currency units.
    pub amount: i64,

    /// Customer email for the gateway receipt.
    pub customer_email: String,

    /// Display name of the purchased item.
    pub item_name: String,
}

/// An open payment session at the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSession {
    /// Gateway session token.
    pub token: String,

    /// URL the frontend redirects the customer to.
    pub redirect_url: String,
}

/// Errors returned by the payment gateway adapter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Gateway rejected the request: {0}")]
    Rejected(String),

    #[error("Gateway request failed: {0}")]
    RequestFailed(String),

    #[error("Gateway returned an unexpected response: {0}")]
    InvalidResponse(String),
}

/// Port for the payment gateway checkout API.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Opens a payment session for a pending transaction.
    async fn create_payment(
        &self,
        request: CreatePaymentRequest,
    ) -> Result<PaymentSession, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn PaymentGateway) {}
    }

    #[test]
    fn gateway_error_displays_reason() {
        let err = GatewayError::Rejected("amount mismatch".to_string());
        assert_eq!(
            format!("{}", err),
            "Gateway rejected the request: amount mismatch"
        );
    }
}
