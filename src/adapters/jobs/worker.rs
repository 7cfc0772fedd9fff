//! JobWorker - background service executing queued jobs.
//!
//! Polls the job queue on an interval and dispatches each due job to its
//! registered handler. A failed job is retried with a fixed delay until the
//! attempt ceiling; exhaustion is logged as a fatal, non-retryable failure
//! requiring manual reconciliation, and the job is marked dead.
//!
//! ## Graceful Shutdown
//!
//! The worker listens for a shutdown signal and completes the current batch
//! before stopping.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time;

use crate::config::JobsConfig;
use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::{JobKind, JobQueue, QueuedJob};

/// Error raised by a job handler. All failures are retryable; the worker's
/// attempt ceiling bounds them.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct JobError(pub String);

impl JobError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Handler for one kind of background job.
#[async_trait]
pub trait JobHandler: Send + Sync {
    /// The job kind this handler executes.
    fn kind(&self) -> JobKind;

    /// Executes the job.
    async fn execute(&self, job: &QueuedJob) -> Result<(), JobError>;
}

/// Routes jobs to their handlers by kind.
#[derive(Default)]
pub struct JobDispatcher {
    handlers: HashMap<JobKind, Arc<dyn JobHandler>>,
}

impl JobDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler, replacing any previous handler for the kind.
    pub fn register(mut self, handler: Arc<dyn JobHandler>) -> Self {
        self.handlers.insert(handler.kind(), handler);
        self
    }

    fn get_handler(&self, kind: JobKind) -> Option<&Arc<dyn JobHandler>> {
        self.handlers.get(&kind)
    }
}

/// Background worker draining the job queue.
pub struct JobWorker {
    queue: Arc<dyn JobQueue>,
    dispatcher: JobDispatcher,
    config: JobsConfig,
}

impl JobWorker {
    pub fn new(queue: Arc<dyn JobQueue>, dispatcher: JobDispatcher, config: JobsConfig) -> Self {
        Self {
            queue,
            dispatcher,
            config,
        }
    }

    /// Runs the worker loop until the shutdown signal fires.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<(), DomainError> {
        let mut interval = time::interval(self.config.poll_interval());

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        // Drain one final batch before stopping.
                        self.process_batch().await?;
                        return Ok(());
                    }
                }

                _ = interval.tick() => {
                    self.process_batch().await?;
                }
            }
        }
    }

    /// Processes one batch of due jobs. Returns the number of successes.
    pub async fn process_batch(&self) -> Result<usize, DomainError> {
        let jobs = self.queue.fetch_due(self.config.batch_size).await?;
        let mut succeeded = 0;

        for job in jobs {
            match self.execute_job(&job).await {
                Ok(()) => {
                    self.queue.mark_succeeded(job.id).await?;
                    succeeded += 1;
                }
                Err(e) => {
                    if job.on_final_attempt() {
                        tracing::error!(
                            job_id = %job.id,
                            kind = job.kind.as_str(),
                            attempts = job.attempts + 1,
                            error = %e,
                            "job retries exhausted; marking dead - manual reconciliation required"
                        );
                        self.queue.mark_dead(job.id, &e.0).await?;
                    } else {
                        tracing::warn!(
                            job_id = %job.id,
                            kind = job.kind.as_str(),
                            attempt = job.attempts + 1,
                            error = %e,
                            "job failed; scheduling retry"
                        );
                        let retry_at = Timestamp::now().plus_secs(self.config.retry_delay_secs);
                        self.queue.mark_retry(job.id, &e.0, retry_at).await?;
                    }
                }
            }
        }

        Ok(succeeded)
    }

    /// Runs exactly one poll cycle (for testing).
    pub async fn poll_once(&self) -> Result<usize, DomainError> {
        self.process_batch().await
    }

    async fn execute_job(&self, job: &QueuedJob) -> Result<(), JobError> {
        match self.dispatcher.get_handler(job.kind) {
            Some(handler) => handler.execute(job).await,
            None => Err(JobError::new(format!(
                "no handler registered for job kind {}",
                job.kind.as_str()
            ))),
        }
    }
}
