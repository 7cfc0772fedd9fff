//! Maintenance pass - periodic housekeeping sweeps.
//!
//! Three sweeps run on a fixed interval:
//! - pending transactions past their expiry window become `Expired`
//! - active subscriptions past their period end become `Expired`
//! - active enrollments with an overdue report get a reminder queued

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde_json::json;
use tokio::sync::watch;
use tokio::time;

use crate::domain::billing::TransactionExpired;
use crate::domain::enrollment::ReportState;
use crate::domain::foundation::{DomainError, EventId, SerializableDomainEvent, Timestamp};
use crate::ports::{
    EnrollmentRepository, EventPublisher, JobKind, JobQueue, QueuedJob, SubscriptionRepository,
    TransactionRepository, WebhookEventRepository,
};

/// Default sweep interval: one hour.
const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(3600);

/// Processed webhook records are kept this many days for reconciliation.
const WEBHOOK_RETENTION_DAYS: i64 = 30;

/// Periodic housekeeping service.
pub struct MaintenanceService {
    transactions: Arc<dyn TransactionRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    webhook_events: Arc<dyn WebhookEventRepository>,
    job_queue: Arc<dyn JobQueue>,
    event_publisher: Arc<dyn EventPublisher>,
    job_max_attempts: u32,
    interval: Duration,
}

impl MaintenanceService {
    pub fn new(
        transactions: Arc<dyn TransactionRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        webhook_events: Arc<dyn WebhookEventRepository>,
        job_queue: Arc<dyn JobQueue>,
        event_publisher: Arc<dyn EventPublisher>,
        job_max_attempts: u32,
    ) -> Self {
        Self {
            transactions,
            subscriptions,
            enrollments,
            webhook_events,
            job_queue,
            event_publisher,
            job_max_attempts,
            interval: DEFAULT_SWEEP_INTERVAL,
        }
    }

    /// Overrides the sweep interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Runs sweeps until the shutdown signal fires.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<(), DomainError> {
        let mut interval = time::interval(self.interval);

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        return Ok(());
                    }
                }

                _ = interval.tick() => {
                    self.run_once().await?;
                }
            }
        }
    }

    /// Runs all sweeps once.
    pub async fn run_once(&self) -> Result<(), DomainError> {
        self.expire_transactions().await?;
        self.expire_subscriptions().await?;
        self.queue_report_reminders().await?;
        self.prune_webhook_events().await?;
        Ok(())
    }

    /// Deletes webhook records past the retention window.
    pub async fn prune_webhook_events(&self) -> Result<u64, DomainError> {
        let cutoff = Timestamp::now().add_days(-WEBHOOK_RETENTION_DAYS);
        let pruned = self.webhook_events.delete_before(cutoff).await?;
        if pruned > 0 {
            tracing::info!(pruned, "pruned old webhook records");
        }
        Ok(pruned)
    }

    /// Marks pending transactions past their expiry window as expired.
    pub async fn expire_transactions(&self) -> Result<usize, DomainError> {
        let now = Timestamp::now();
        let lapsed = self.transactions.list_pending_expired(now).await?;
        let count = lapsed.len();

        let updates = lapsed.into_iter().map(|mut transaction| {
            let transactions = Arc::clone(&self.transactions);
            let publisher = Arc::clone(&self.event_publisher);
            async move {
                transaction.mark_expired()?;
                transactions.update(&transaction).await?;

                let event = TransactionExpired {
                    event_id: EventId::new(),
                    transaction_id: transaction.id,
                    user_id: transaction.user_id,
                    order_ref: transaction.order_ref.clone(),
                    occurred_at: Timestamp::now(),
                };
                publisher.publish(event.to_envelope()).await?;

                tracing::info!(order_ref = %transaction.order_ref, "pending transaction expired");
                Ok::<(), DomainError>(())
            }
        });
        for result in join_all(updates).await {
            result?;
        }

        Ok(count)
    }

    /// Expires subscriptions whose period lapsed.
    pub async fn expire_subscriptions(&self) -> Result<usize, DomainError> {
        let now = Timestamp::now();
        let lapsed = self.subscriptions.list_lapsed(now).await?;
        let count = lapsed.len();

        for mut subscription in lapsed {
            subscription.expire()?;
            self.subscriptions.update(&subscription).await?;
            tracing::info!(subscription_id = %subscription.id, "subscription expired");
        }

        Ok(count)
    }

    /// Queues reminders for enrollments with an overdue progress report.
    pub async fn queue_report_reminders(&self) -> Result<usize, DomainError> {
        let now = Timestamp::now();
        let due = self.enrollments.list_report_due(now).await?;
        let mut queued = 0;

        for enrollment in due {
            if enrollment.report_state(now) != ReportState::Overdue {
                continue;
            }
            let job = QueuedJob::new(
                JobKind::SendReportReminder,
                json!({
                    "user_id": enrollment.user_id.to_string(),
                    "enrollment_id": enrollment.id.to_string(),
                    "course_id": enrollment.course_id.to_string(),
                }),
                self.job_max_attempts,
            );
            self.job_queue.enqueue(job).await?;
            queued += 1;
        }

        Ok(queued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{
        InMemoryEnrollments, InMemoryJobQueue, InMemorySubscriptions, InMemoryTransactions,
        InMemoryWebhookEvents,
    };
    use crate::domain::billing::{PurchaseItem, Transaction, TransactionStatus};
    use crate::domain::enrollment::{Enrollment, REPORT_GRACE_DAYS};
    use crate::domain::foundation::{
        CourseId, EnrollmentId, PlanId, SubscriptionId, TransactionId, UserId,
    };
    use crate::domain::subscription::{Subscription, SubscriptionStatus};

    struct Fixture {
        service: MaintenanceService,
        transactions: Arc<InMemoryTransactions>,
        subscriptions: Arc<InMemorySubscriptions>,
        enrollments: Arc<InMemoryEnrollments>,
        job_queue: Arc<InMemoryJobQueue>,
        publisher: Arc<InMemoryEventBus>,
    }

    fn fixture() -> Fixture {
        let transactions = Arc::new(InMemoryTransactions::new());
        let subscriptions = Arc::new(InMemorySubscriptions::new());
        let enrollments = Arc::new(InMemoryEnrollments::new());
        let job_queue = Arc::new(InMemoryJobQueue::new());
        let publisher = Arc::new(InMemoryEventBus::new());
        Fixture {
            service: MaintenanceService::new(
                transactions.clone(),
                subscriptions.clone(),
                enrollments.clone(),
                Arc::new(InMemoryWebhookEvents::new()),
                job_queue.clone(),
                publisher.clone(),
                5,
            ),
            transactions,
            subscriptions,
            enrollments,
            job_queue,
            publisher,
        }
    }

    #[tokio::test]
    async fn lapsed_pending_transaction_is_expired() {
        let fixture = fixture();
        let transaction = Transaction::create_pending(
            TransactionId::new(),
            UserId::new(),
            PurchaseItem::Course(CourseId::new()),
            150_000,
            "bank_transfer",
            "student@example.com",
            "LF-1",
            Timestamp::now().add_hours(-1),
        )
        .unwrap();
        fixture.transactions.save(&transaction).await.unwrap();

        let expired = fixture.service.expire_transactions().await.unwrap();

        assert_eq!(expired, 1);
        let stored = fixture
            .transactions
            .find_by_order_ref("LF-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, TransactionStatus::Expired);
        assert!(fixture
            .publisher
            .event_types()
            .contains(&"transaction.expired.v1".to_string()));
    }

    #[tokio::test]
    async fn paid_transaction_is_not_swept() {
        let fixture = fixture();
        let mut transaction = Transaction::create_pending(
            TransactionId::new(),
            UserId::new(),
            PurchaseItem::Course(CourseId::new()),
            150_000,
            "bank_transfer",
            "student@example.com",
            "LF-1",
            Timestamp::now().add_hours(-1),
        )
        .unwrap();
        transaction
            .apply_gateway_status(TransactionStatus::Paid, serde_json::json!({}))
            .unwrap();
        fixture.transactions.save(&transaction).await.unwrap();

        assert_eq!(fixture.service.expire_transactions().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn lapsed_subscription_is_expired() {
        let fixture = fixture();
        let mut subscription =
            Subscription::open(SubscriptionId::new(), UserId::new(), PlanId::new());
        subscription.record_payment(30).unwrap();
        subscription.current_period_end = Timestamp::now().add_days(-1);
        fixture.subscriptions.save(&subscription).await.unwrap();

        assert_eq!(fixture.service.expire_subscriptions().await.unwrap(), 1);
        let stored = fixture
            .subscriptions
            .find_by_id(&subscription.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, SubscriptionStatus::Expired);
    }

    #[tokio::test]
    async fn overdue_report_queues_a_reminder() {
        let fixture = fixture();
        let mut enrollment = Enrollment::create(EnrollmentId::new(), UserId::new(), CourseId::new());
        enrollment.next_report_due =
            Some(Timestamp::now().add_days(-(REPORT_GRACE_DAYS + 1)));
        fixture.enrollments.save(&enrollment).await.unwrap();

        // A second enrollment merely due (inside grace) gets no reminder.
        let mut due_only = Enrollment::create(EnrollmentId::new(), UserId::new(), CourseId::new());
        due_only.next_report_due = Some(Timestamp::now());
        fixture.enrollments.save(&due_only).await.unwrap();

        let queued = fixture.service.queue_report_reminders().await.unwrap();

        assert_eq!(queued, 1);
        let jobs = fixture.job_queue.jobs_of_kind(JobKind::SendReportReminder);
        assert_eq!(jobs.len(), 1);
        assert_eq!(
            jobs[0].payload["user_id"],
            enrollment.user_id.to_string()
        );
    }
}
