//! Transaction repository port.

use async_trait::async_trait;

use crate::domain::billing::Transaction;
use crate::domain::foundation::{DomainError, Timestamp, TransactionId, UserId};

/// Repository port for Transaction aggregate persistence.
///
/// Implementations must enforce order_ref uniqueness.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Save a new transaction.
    async fn save(&self, transaction: &Transaction) -> Result<(), DomainError>;

    /// Update an existing transaction.
    async fn update(&self, transaction: &Transaction) -> Result<(), DomainError>;

    /// Find a transaction by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &TransactionId) -> Result<Option<Transaction>, DomainError>;

    /// Find a transaction by the gateway order reference.
    ///
    /// This is the lookup used by webhook callback processing.
    async fn find_by_order_ref(&self, order_ref: &str)
        -> Result<Option<Transaction>, DomainError>;

    /// List a user's transactions, newest first.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Transaction>, DomainError>;

    /// List pending transactions whose expiry window lapsed (expiry sweep).
    async fn list_pending_expired(
        &self,
        expired_by: Timestamp,
    ) -> Result<Vec<Transaction>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn TransactionRepository) {}
    }
}
