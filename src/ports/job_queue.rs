//! Job queue port - persisted background work with bounded retries.
//!
//! Side effects that must not block a request (confirmation email, webhook
//! callback processing, report reminders) are enqueued here and executed by
//! the background worker. A failed job is retried a bounded number of times
//! with a fixed delay; an exhausted job is marked dead and logged as a
//! fatal failure requiring manual reconciliation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::foundation::{DomainError, JobId, Timestamp};

/// The kinds of background jobs the worker knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    /// Apply a verified gateway notification to its transaction.
    ProcessPaymentCallback,

    /// Send the payment confirmation email for a paid transaction.
    SendPaymentConfirmation,

    /// Remind a student that a progress report is due.
    SendReportReminder,
}

impl JobKind {
    /// Stable discriminator used for persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::ProcessPaymentCallback => "process_payment_callback",
            JobKind::SendPaymentConfirmation => "send_payment_confirmation",
            JobKind::SendReportReminder => "send_report_reminder",
        }
    }

    /// Rebuilds the kind from its persisted discriminator.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "process_payment_callback" => Some(JobKind::ProcessPaymentCallback),
            "send_payment_confirmation" => Some(JobKind::SendPaymentConfirmation),
            "send_report_reminder" => Some(JobKind::SendReportReminder),
            _ => None,
        }
    }
}

/// Delivery status of a queued job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Waiting for its run_at time (first attempt or retry).
    Pending,

    /// Completed successfully.
    Succeeded,

    /// Retries exhausted; requires manual reconciliation.
    Dead,
}

/// A queued background job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueuedJob {
    pub id: JobId,

    pub kind: JobKind,

    /// Job-specific arguments (e.g. the notification body).
    pub payload: JsonValue,

    pub status: JobStatus,

    /// Attempts made so far.
    pub attempts: u32,

    /// Attempt ceiling; reaching it marks the job dead.
    pub max_attempts: u32,

    /// Earliest time the job may run.
    pub run_at: Timestamp,

    /// Error from the most recent failed attempt.
    pub last_error: Option<String>,

    pub created_at: Timestamp,
}

impl QueuedJob {
    /// Creates a job ready to run immediately.
    pub fn new(kind: JobKind, payload: JsonValue, max_attempts: u32) -> Self {
        let now = Timestamp::now();
        Self {
            id: JobId::new(),
            kind,
            payload,
            status: JobStatus::Pending,
            attempts: 0,
            max_attempts,
            run_at: now,
            last_error: None,
            created_at: now,
        }
    }

    /// True when the next failure would exhaust the retry budget.
    pub fn on_final_attempt(&self) -> bool {
        self.attempts + 1 >= self.max_attempts
    }
}

/// Port for the persisted job queue.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Enqueue a job.
    async fn enqueue(&self, job: QueuedJob) -> Result<JobId, DomainError>;

    /// Fetch up to `limit` pending jobs whose run_at has passed.
    ///
    /// Fetched jobs must be invisible to concurrent workers
    /// (`FOR UPDATE SKIP LOCKED` or equivalent).
    async fn fetch_due(&self, limit: u32) -> Result<Vec<QueuedJob>, DomainError>;

    /// Mark a job as succeeded.
    async fn mark_succeeded(&self, id: JobId) -> Result<(), DomainError>;

    /// Record a failed attempt and schedule the retry.
    async fn mark_retry(
        &self,
        id: JobId,
        error: &str,
        retry_at: Timestamp,
    ) -> Result<(), DomainError>;

    /// Record a failed attempt and mark the job dead (retries exhausted).
    async fn mark_dead(&self, id: JobId, error: &str) -> Result<(), DomainError>;
}
