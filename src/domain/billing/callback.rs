//! Gateway callback status reconciliation.
//!
//! The payment gateway reports asynchronous payment outcomes as a
//! `transaction_status` string, optionally qualified by a `fraud_status`
//! for card captures. This module maps that pair into the internal
//! [`TransactionStatus`].

use super::TransactionStatus;

/// Maps a gateway (transaction_status, fraud_status) pair to the internal
/// transaction status.
///
/// | transaction_status        | fraud_status | result    |
/// |---------------------------|--------------|-----------|
/// | `capture`                 | `accept`     | Paid      |
/// | `capture`                 | other/none   | Pending   |
/// | `settlement`              | -            | Paid      |
/// | `pending`                 | -            | Pending   |
/// | `deny`/`cancel`/`expire`  | -            | Cancelled |
/// | anything else             | -            | Pending   |
///
/// Unknown statuses deliberately resolve to `Pending`: an unrecognized
/// notification must never grant or revoke a purchase.
pub fn reconcile_status(
    transaction_status: &str,
    fraud_status: Option<&str>,
) -> TransactionStatus {
    match transaction_status {
        "capture" => match fraud_status {
            Some("accept") => TransactionStatus::Paid,
            _ => TransactionStatus::Pending,
        },
        "settlement" => TransactionStatus::Paid,
        "pending" => TransactionStatus::Pending,
        "deny" | "cancel" | "expire" => TransactionStatus::Cancelled,
        _ => TransactionStatus::Pending,
    }
}
