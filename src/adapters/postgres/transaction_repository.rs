//! PostgreSQL implementation of TransactionRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::billing::{PurchaseItem, Transaction, TransactionStatus};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, TransactionId, UserId};
use crate::ports::TransactionRepository;

/// PostgreSQL implementation of the TransactionRepository port.
pub struct PostgresTransactionRepository {
    pool: PgPool,
}

impl PostgresTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: Uuid,
    user_id: Uuid,
    item_kind: String,
    item_id: Uuid,
    amount: i64,
    payment_method: String,
    customer_email: String,
    status: String,
    order_ref: String,
    gateway_metadata: Option<JsonValue>,
    proof_of_payment: Option<String>,
    paid_at: Option<DateTime<Utc>>,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = DomainError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Transaction {
            id: TransactionId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            item: PurchaseItem::from_parts(&row.item_kind, row.item_id)?,
            amount: row.amount,
            payment_method: row.payment_method,
            customer_email: row.customer_email,
            status: parse_status(&row.status)?,
            order_ref: row.order_ref,
            gateway_metadata: row.gateway_metadata,
            proof_of_payment: row.proof_of_payment,
            paid_at: row.paid_at.map(Timestamp::from_datetime),
            expires_at: Timestamp::from_datetime(row.expires_at),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_status(s: &str) -> Result<TransactionStatus, DomainError> {
    match s {
        "pending" => Ok(TransactionStatus::Pending),
        "paid" => Ok(TransactionStatus::Paid),
        "cancelled" => Ok(TransactionStatus::Cancelled),
        "expired" => Ok(TransactionStatus::Expired),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid transaction status: {}", s),
        )),
    }
}

fn status_to_string(status: &TransactionStatus) -> &'static str {
    match status {
        TransactionStatus::Pending => "pending",
        TransactionStatus::Paid => "paid",
        TransactionStatus::Cancelled => "cancelled",
        TransactionStatus::Expired => "expired",
    }
}

const SELECT_COLUMNS: &str = "id, user_id, item_kind, item_id, amount, payment_method, \
                              customer_email, status, order_ref, gateway_metadata, \
                              proof_of_payment, paid_at, expires_at, created_at, updated_at";

#[async_trait]
impl TransactionRepository for PostgresTransactionRepository {
    async fn save(&self, transaction: &Transaction) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, user_id, item_kind, item_id, amount, payment_method, customer_email,
                status, order_ref, gateway_metadata, proof_of_payment, paid_at,
                expires_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(transaction.id.as_uuid())
        .bind(transaction.user_id.as_uuid())
        .bind(transaction.item.kind())
        .bind(transaction.item.item_uuid())
        .bind(transaction.amount)
        .bind(&transaction.payment_method)
        .bind(&transaction.customer_email)
        .bind(status_to_string(&transaction.status))
        .bind(&transaction.order_ref)
        .bind(&transaction.gateway_metadata)
        .bind(&transaction.proof_of_payment)
        .bind(transaction.paid_at.map(|t| *t.as_datetime()))
        .bind(transaction.expires_at.as_datetime())
        .bind(transaction.created_at.as_datetime())
        .bind(transaction.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save transaction: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, transaction: &Transaction) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE transactions SET
                status = $2,
                gateway_metadata = $3,
                proof_of_payment = $4,
                paid_at = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(transaction.id.as_uuid())
        .bind(status_to_string(&transaction.status))
        .bind(&transaction.gateway_metadata)
        .bind(&transaction.proof_of_payment)
        .bind(transaction.paid_at.map(|t| *t.as_datetime()))
        .bind(transaction.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update transaction: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::TransactionNotFound,
                "Transaction not found",
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &TransactionId) -> Result<Option<Transaction>, DomainError> {
        let row: Option<TransactionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM transactions WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find transaction: {}", e),
            )
        })?;

        row.map(Transaction::try_from).transpose()
    }

    async fn find_by_order_ref(
        &self,
        order_ref: &str,
    ) -> Result<Option<Transaction>, DomainError> {
        let row: Option<TransactionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM transactions WHERE order_ref = $1",
            SELECT_COLUMNS
        ))
        .bind(order_ref)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find transaction: {}", e),
            )
        })?;

        row.map(Transaction::try_from).transpose()
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Transaction>, DomainError> {
        let rows: Vec<TransactionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM transactions WHERE user_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list transactions: {}", e),
            )
        })?;

        rows.into_iter().map(Transaction::try_from).collect()
    }

    async fn list_pending_expired(
        &self,
        expired_by: Timestamp,
    ) -> Result<Vec<Transaction>, DomainError> {
        let rows: Vec<TransactionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM transactions WHERE status = 'pending' AND expires_at < $1",
            SELECT_COLUMNS
        ))
        .bind(expired_by.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list expired transactions: {}", e),
            )
        })?;

        rows.into_iter().map(Transaction::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrips() {
        for status in [
            TransactionStatus::Pending,
            TransactionStatus::Paid,
            TransactionStatus::Cancelled,
            TransactionStatus::Expired,
        ] {
            assert_eq!(parse_status(status_to_string(&status)).unwrap(), status);
        }
        assert!(parse_status("refunded").is_err());
    }
}
