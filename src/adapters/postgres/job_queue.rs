//! PostgreSQL implementation of the JobQueue port.
//!
//! `fetch_due` claims jobs with `FOR UPDATE SKIP LOCKED` inside a short
//! transaction and bumps `run_at` by a visibility window, so concurrent
//! workers never double-run a job and a crashed worker's jobs resurface.

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, JobId, Timestamp};
use crate::ports::{JobKind, JobQueue, JobStatus, QueuedJob};

/// How long a fetched job stays invisible before it is retried as lost.
const VISIBILITY_WINDOW_SECS: i64 = 300;

/// PostgreSQL implementation of the JobQueue port.
pub struct PostgresJobQueue {
    pool: PgPool,
}

impl PostgresJobQueue {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct JobRow {
    id: Uuid,
    kind: String,
    payload: JsonValue,
    status: String,
    attempts: i32,
    max_attempts: i32,
    run_at: DateTime<Utc>,
    last_error: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<JobRow> for QueuedJob {
    type Error = DomainError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let kind = JobKind::parse(&row.kind).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid job kind: {}", row.kind),
            )
        })?;
        let status = match row.status.as_str() {
            "pending" => JobStatus::Pending,
            "succeeded" => JobStatus::Succeeded,
            "dead" => JobStatus::Dead,
            other => {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid job status: {}", other),
                ))
            }
        };
        Ok(QueuedJob {
            id: JobId::from_uuid(row.id),
            kind,
            payload: row.payload,
            status,
            attempts: row.attempts.max(0) as u32,
            max_attempts: row.max_attempts.max(1) as u32,
            run_at: Timestamp::from_datetime(row.run_at),
            last_error: row.last_error,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn status_to_string(status: &JobStatus) -> &'static str {
    match status {
        JobStatus::Pending => "pending",
        JobStatus::Succeeded => "succeeded",
        JobStatus::Dead => "dead",
    }
}

#[async_trait]
impl JobQueue for PostgresJobQueue {
    async fn enqueue(&self, job: QueuedJob) -> Result<JobId, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO jobs (
                id, kind, payload, status, attempts, max_attempts, run_at,
                last_error, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(job.id.as_uuid())
        .bind(job.kind.as_str())
        .bind(&job.payload)
        .bind(status_to_string(&job.status))
        .bind(job.attempts as i32)
        .bind(job.max_attempts as i32)
        .bind(job.run_at.as_datetime())
        .bind(&job.last_error)
        .bind(job.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to enqueue job: {}", e))
        })?;

        Ok(job.id)
    }

    async fn fetch_due(&self, limit: u32) -> Result<Vec<QueuedJob>, DomainError> {
        let mut txn = self.pool.begin().await.map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to begin txn: {}", e))
        })?;

        let rows: Vec<JobRow> = sqlx::query_as(
            r#"
            SELECT id, kind, payload, status, attempts, max_attempts, run_at,
                   last_error, created_at
            FROM jobs
            WHERE status = 'pending' AND run_at <= NOW()
            ORDER BY run_at
            LIMIT $1
            FOR UPDATE SKIP LOCKED
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&mut *txn)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to fetch jobs: {}", e))
        })?;

        let invisible_until = Utc::now() + ChronoDuration::seconds(VISIBILITY_WINDOW_SECS);
        for row in &rows {
            sqlx::query("UPDATE jobs SET run_at = $2 WHERE id = $1")
                .bind(row.id)
                .bind(invisible_until)
                .execute(&mut *txn)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to claim job: {}", e),
                    )
                })?;
        }

        txn.commit().await.map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to commit txn: {}", e))
        })?;

        rows.into_iter().map(QueuedJob::try_from).collect()
    }

    async fn mark_succeeded(&self, id: JobId) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE jobs SET status = 'succeeded', attempts = attempts + 1 WHERE id = $1",
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to update job: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::JobNotFound, "Job not found"));
        }
        Ok(())
    }

    async fn mark_retry(
        &self,
        id: JobId,
        error: &str,
        retry_at: Timestamp,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE jobs SET
                attempts = attempts + 1,
                last_error = $2,
                run_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(error)
        .bind(retry_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to update job: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::JobNotFound, "Job not found"));
        }
        Ok(())
    }

    async fn mark_dead(&self, id: JobId, error: &str) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE jobs SET
                status = 'dead',
                attempts = attempts + 1,
                last_error = $2
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(error)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to update job: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::JobNotFound, "Job not found"));
        }
        Ok(())
    }
}
