//! Domain events emitted by the billing context.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EventId, Timestamp, TransactionId, UserId};
use crate::domain_event;

use super::PurchaseItem;

/// A checkout was created and a pending transaction opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutCreated {
    pub event_id: EventId,
    pub transaction_id: TransactionId,
    pub user_id: UserId,
    pub item: PurchaseItem,
    pub amount: i64,
    pub order_ref: String,
    pub occurred_at: Timestamp,
}

domain_event!(
    CheckoutCreated,
    event_type = "transaction.checkout_created.v1",
    aggregate_id = transaction_id,
    aggregate_type = "Transaction",
    occurred_at = occurred_at,
    event_id = event_id
);

/// A transaction was confirmed paid by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionPaid {
    pub event_id: EventId,
    pub transaction_id: TransactionId,
    pub user_id: UserId,
    pub item: PurchaseItem,
    pub amount: i64,
    pub order_ref: String,
    pub occurred_at: Timestamp,
}

domain_event!(
    TransactionPaid,
    event_type = "transaction.paid.v1",
    aggregate_id = transaction_id,
    aggregate_type = "Transaction",
    occurred_at = occurred_at,
    event_id = event_id
);

/// A transaction was cancelled (gateway deny/cancel/expire).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionCancelled {
    pub event_id: EventId,
    pub transaction_id: TransactionId,
    pub user_id: UserId,
    pub order_ref: String,
    pub gateway_status: String,
    pub occurred_at: Timestamp,
}

domain_event!(
    TransactionCancelled,
    event_type = "transaction.cancelled.v1",
    aggregate_id = transaction_id,
    aggregate_type = "Transaction",
    occurred_at = occurred_at,
    event_id = event_id
);

/// A pending transaction lapsed past its expiry window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionExpired {
    pub event_id: EventId,
    pub transaction_id: TransactionId,
    pub user_id: UserId,
    pub order_ref: String,
    pub occurred_at: Timestamp,
}

domain_event!(
    TransactionExpired,
    event_type = "transaction.expired.v1",
    aggregate_id = transaction_id,
    aggregate_type = "Transaction",
    occurred_at = occurred_at,
    event_id = event_id
);
