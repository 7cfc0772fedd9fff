//! PostgreSQL implementation of WebhookEventRepository.
//!
//! The `event_key` PRIMARY KEY makes concurrent saves first-writer-wins:
//! `ON CONFLICT DO NOTHING` with zero rows affected means another delivery
//! already won the race.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::ports::{SaveResult, WebhookDisposition, WebhookEventRecord, WebhookEventRepository};

/// PostgreSQL implementation of the WebhookEventRepository port.
pub struct PostgresWebhookEventRepository {
    pool: PgPool,
}

impl PostgresWebhookEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WebhookEventRow {
    event_key: String,
    order_id: String,
    disposition: String,
    payload: JsonValue,
    received_at: DateTime<Utc>,
}

impl TryFrom<WebhookEventRow> for WebhookEventRecord {
    type Error = DomainError;

    fn try_from(row: WebhookEventRow) -> Result<Self, Self::Error> {
        let disposition = match row.disposition.as_str() {
            "accepted" => WebhookDisposition::Accepted,
            "ignored" => WebhookDisposition::Ignored,
            other => {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid webhook disposition: {}", other),
                ))
            }
        };
        Ok(WebhookEventRecord {
            event_key: row.event_key,
            order_id: row.order_id,
            disposition,
            payload: row.payload,
            received_at: Timestamp::from_datetime(row.received_at),
        })
    }
}

fn disposition_to_string(disposition: &WebhookDisposition) -> &'static str {
    match disposition {
        WebhookDisposition::Accepted => "accepted",
        WebhookDisposition::Ignored => "ignored",
    }
}

#[async_trait]
impl WebhookEventRepository for PostgresWebhookEventRepository {
    async fn find_by_key(
        &self,
        event_key: &str,
    ) -> Result<Option<WebhookEventRecord>, DomainError> {
        let row: Option<WebhookEventRow> = sqlx::query_as(
            "SELECT event_key, order_id, disposition, payload, received_at \
             FROM webhook_events WHERE event_key = $1",
        )
        .bind(event_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find webhook event: {}", e),
            )
        })?;

        row.map(WebhookEventRecord::try_from).transpose()
    }

    async fn save(&self, record: WebhookEventRecord) -> Result<SaveResult, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO webhook_events (event_key, order_id, disposition, payload, received_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (event_key) DO NOTHING
            "#,
        )
        .bind(&record.event_key)
        .bind(&record.order_id)
        .bind(disposition_to_string(&record.disposition))
        .bind(&record.payload)
        .bind(record.received_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save webhook event: {}", e),
            )
        })?;

        if result.rows_affected() > 0 {
            Ok(SaveResult::Inserted)
        } else {
            Ok(SaveResult::AlreadyExists)
        }
    }

    async fn delete_before(&self, cutoff: Timestamp) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM webhook_events WHERE received_at < $1")
            .bind(cutoff.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to prune webhook events: {}", e),
                )
            })?;

        Ok(result.rows_affected())
    }
}
