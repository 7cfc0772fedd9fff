//! Billing-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound / NotFoundForOrder | 404 |
//! | ItemNotPurchasable | 422 |
//! | TransactionFinal | 409 |
//! | GatewayFailed | 502 |
//! | InvalidWebhookSignature | 401 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, TransactionId};

/// Errors raised while verifying and parsing webhook notifications.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WebhookError {
    #[error("Notification signature verification failed")]
    InvalidSignature,

    #[error("Failed to parse notification: {0}")]
    ParseError(String),

    #[error("Storage error while recording notification: {0}")]
    Database(String),
}

impl From<DomainError> for WebhookError {
    fn from(err: DomainError) -> Self {
        WebhookError::Database(err.to_string())
    }
}

/// Billing-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingError {
    /// Transaction was not found.
    NotFound(TransactionId),

    /// No transaction exists for this gateway order reference.
    NotFoundForOrder(String),

    /// The requested item cannot be purchased (unpublished course, unknown plan).
    ItemNotPurchasable { reason: String },

    /// The transaction has already reached a terminal status.
    TransactionFinal { current: String, attempted: String },

    /// The payment gateway rejected or failed the request.
    GatewayFailed { reason: String },

    /// Webhook signature verification failed.
    InvalidWebhookSignature,

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl BillingError {
    pub fn not_found(id: TransactionId) -> Self {
        BillingError::NotFound(id)
    }

    pub fn not_found_for_order(order_ref: impl Into<String>) -> Self {
        BillingError::NotFoundForOrder(order_ref.into())
    }

    pub fn item_not_purchasable(reason: impl Into<String>) -> Self {
        BillingError::ItemNotPurchasable {
            reason: reason.into(),
        }
    }

    pub fn transaction_final(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        BillingError::TransactionFinal {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn gateway_failed(reason: impl Into<String>) -> Self {
        BillingError::GatewayFailed {
            reason: reason.into(),
        }
    }

    pub fn invalid_webhook_signature() -> Self {
        BillingError::InvalidWebhookSignature
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BillingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        BillingError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            BillingError::NotFound(_) | BillingError::NotFoundForOrder(_) => {
                ErrorCode::TransactionNotFound
            }
            BillingError::ItemNotPurchasable { .. } => ErrorCode::CourseNotPublished,
            BillingError::TransactionFinal { .. } => ErrorCode::TransactionFinal,
            BillingError::GatewayFailed { .. } => ErrorCode::PaymentGatewayError,
            BillingError::InvalidWebhookSignature => ErrorCode::InvalidWebhookSignature,
            BillingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            BillingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            BillingError::NotFound(id) => format!("Transaction not found: {}", id),
            BillingError::NotFoundForOrder(order_ref) => {
                format!("No transaction found for order: {}", order_ref)
            }
            BillingError::ItemNotPurchasable { reason } => {
                format!("Item cannot be purchased: {}", reason)
            }
            BillingError::TransactionFinal { current, attempted } => {
                format!("Transaction is {} and cannot become {}", current, attempted)
            }
            BillingError::GatewayFailed { reason } => {
                format!("Payment gateway request failed: {}", reason)
            }
            BillingError::InvalidWebhookSignature => "Invalid webhook signature".to_string(),
            BillingError::ValidationFailed { field, message } => {
                format!("Validation failed for {}: {}", field, message)
            }
            BillingError::Infrastructure(message) => message.clone(),
        }
    }
}

impl std::fmt::Display for BillingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message())
    }
}

impl std::error::Error for BillingError {}

impl From<DomainError> for BillingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::TransactionFinal => {
                BillingError::transaction_final("terminal", err.message)
            }
            ErrorCode::TransactionNotFound => BillingError::infrastructure(err.message),
            _ => BillingError::Infrastructure(err.to_string()),
        }
    }
}

impl From<WebhookError> for BillingError {
    fn from(err: WebhookError) -> Self {
        match err {
            WebhookError::InvalidSignature => BillingError::InvalidWebhookSignature,
            WebhookError::ParseError(msg) => BillingError::validation("payload", msg),
            WebhookError::Database(msg) => BillingError::Infrastructure(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_map_correctly() {
        assert_eq!(
            BillingError::not_found(TransactionId::new()).code(),
            ErrorCode::TransactionNotFound
        );
        assert_eq!(
            BillingError::invalid_webhook_signature().code(),
            ErrorCode::InvalidWebhookSignature
        );
        assert_eq!(
            BillingError::gateway_failed("timeout").code(),
            ErrorCode::PaymentGatewayError
        );
    }

    #[test]
    fn webhook_error_converts_to_billing_error() {
        let err: BillingError = WebhookError::InvalidSignature.into();
        assert_eq!(err, BillingError::InvalidWebhookSignature);

        let err: BillingError = WebhookError::ParseError("bad json".to_string()).into();
        assert!(matches!(err, BillingError::ValidationFailed { .. }));
    }

    #[test]
    fn display_includes_code_and_message() {
        let err = BillingError::not_found_for_order("LF-404");
        let rendered = format!("{}", err);
        assert!(rendered.contains("TRANSACTION_NOT_FOUND"));
        assert!(rendered.contains("LF-404"));
    }
}
