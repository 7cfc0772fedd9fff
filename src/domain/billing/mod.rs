//! Billing context - payment transactions and the gateway webhook lifecycle.
//!
//! A [`Transaction`] records a purchase (course or subscription plan). The
//! payment gateway reports outcomes asynchronously via signed webhook
//! notifications; [`reconcile_status`] maps the gateway's status pair into
//! the internal [`TransactionStatus`].

mod callback;
mod errors;
mod events;
mod notification;
mod signature;
mod transaction;

pub use callback::reconcile_status;
pub use errors::{BillingError, WebhookError};
pub use events::{CheckoutCreated, TransactionCancelled, TransactionExpired, TransactionPaid};
pub use notification::GatewayNotification;
pub use signature::NotificationVerifier;
pub use transaction::{CallbackOutcome, PurchaseItem, Transaction, TransactionStatus};
