//! Integration tests for the payment lifecycle.
//!
//! End-to-end over in-memory adapters:
//! 1. Checkout opens a pending transaction and a gateway session
//! 2. The signed webhook notification is received, recorded and queued
//! 3. The worker applies the callback: transaction paid, enrollment granted
//! 4. The confirmation email job is queued and delivered by the worker

use std::sync::Arc;

use sha2::{Digest, Sha512};

use learnforge::adapters::email::MockMailer;
use learnforge::adapters::events::InMemoryEventBus;
use learnforge::adapters::gateway::MockPaymentGateway;
use learnforge::adapters::jobs::{
    JobDispatcher, JobWorker, PaymentConfirmationJob, ProcessCallbackJob,
};
use learnforge::adapters::memory::{
    InMemoryCourses, InMemoryEnrollments, InMemoryJobQueue, InMemoryProfiles,
    InMemorySubscriptions, InMemoryTransactions, InMemoryWebhookEvents,
};
use learnforge::application::handlers::billing::{
    ApplyCallbackHandler, CheckoutItem, CreateCheckoutCommand, CreateCheckoutHandler,
    ReceiveCallbackCommand, ReceiveCallbackHandler,
};
use learnforge::application::handlers::enrollment::GrantEnrollmentHandler;
use learnforge::application::handlers::user::ProgressionService;
use learnforge::config::JobsConfig;
use learnforge::domain::billing::{NotificationVerifier, TransactionStatus};
use learnforge::domain::catalog::{Course, CourseLevel};
use learnforge::domain::foundation::{CourseId, UserId};
use learnforge::ports::{
    CourseRepository, EnrollmentRepository, JobKind, TransactionRepository, WebhookResult,
};

const SERVER_KEY: &str = "SB-integration-server-key";

// =============================================================================
// Test Harness
// =============================================================================

struct Harness {
    courses: Arc<InMemoryCourses>,
    enrollments: Arc<InMemoryEnrollments>,
    transactions: Arc<InMemoryTransactions>,
    webhook_events: Arc<InMemoryWebhookEvents>,
    job_queue: Arc<InMemoryJobQueue>,
    mailer: Arc<MockMailer>,
    checkout: CreateCheckoutHandler,
    receive: ReceiveCallbackHandler,
    worker: JobWorker,
}

fn harness() -> Harness {
    let courses = Arc::new(InMemoryCourses::new());
    let enrollments = Arc::new(InMemoryEnrollments::new());
    let subscriptions = Arc::new(InMemorySubscriptions::new());
    let transactions = Arc::new(InMemoryTransactions::new());
    let webhook_events = Arc::new(InMemoryWebhookEvents::new());
    let job_queue = Arc::new(InMemoryJobQueue::new());
    let profiles = Arc::new(InMemoryProfiles::new());
    let mailer = Arc::new(MockMailer::new());
    let events = Arc::new(InMemoryEventBus::new());
    let progression = Arc::new(ProgressionService::new(profiles));

    let checkout = CreateCheckoutHandler::new(
        courses.clone(),
        enrollments.clone(),
        subscriptions.clone(),
        transactions.clone(),
        Arc::new(MockPaymentGateway::new()),
        progression.clone(),
        events.clone(),
        24,
    );
    let receive = ReceiveCallbackHandler::new(
        Arc::new(NotificationVerifier::new(SERVER_KEY)),
        transactions.clone(),
        webhook_events.clone(),
        job_queue.clone(),
        5,
    );

    let grant = Arc::new(GrantEnrollmentHandler::new(
        enrollments.clone(),
        progression,
        events.clone(),
    ));
    let apply = Arc::new(ApplyCallbackHandler::new(
        transactions.clone(),
        subscriptions,
        grant,
        job_queue.clone(),
        events,
        5,
    ));
    let dispatcher = JobDispatcher::new()
        .register(Arc::new(ProcessCallbackJob::new(apply)))
        .register(Arc::new(PaymentConfirmationJob::new(mailer.clone())));
    let worker = JobWorker::new(
        job_queue.clone(),
        dispatcher,
        JobsConfig {
            poll_interval_ms: 10,
            batch_size: 10,
            max_attempts: 5,
            retry_delay_secs: 0,
        },
    );

    Harness {
        courses,
        enrollments,
        transactions,
        webhook_events,
        job_queue,
        mailer,
        checkout,
        receive,
        worker,
    }
}

async fn seed_published_course(harness: &Harness, price: i64) -> Course {
    let mut course = Course::create(
        CourseId::new(),
        UserId::new(),
        "Production Rust",
        "production-rust",
        "",
        price,
        CourseLevel::Advanced,
    )
    .unwrap();
    course.publish().unwrap();
    harness.courses.save(&course).await.unwrap();
    course
}

fn signed_notification(order_ref: &str, status: &str, gross_amount: &str) -> Vec<u8> {
    let mut hasher = Sha512::new();
    hasher.update(order_ref.as_bytes());
    hasher.update(b"200");
    hasher.update(gross_amount.as_bytes());
    hasher.update(SERVER_KEY.as_bytes());
    let signature = hex::encode(hasher.finalize());

    serde_json::to_vec(&serde_json::json!({
        "order_id": order_ref,
        "transaction_status": status,
        "status_code": "200",
        "gross_amount": gross_amount,
        "payment_type": "bank_transfer",
        "signature_key": signature,
    }))
    .unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn settlement_pays_enrolls_and_sends_confirmation() {
    let harness = harness();
    let course = seed_published_course(&harness, 250_000).await;
    let student = UserId::new();

    // 1. Checkout
    let checkout = harness
        .checkout
        .handle(CreateCheckoutCommand {
            user_id: student,
            email: "student@example.com".to_string(),
            item: CheckoutItem::Course(course.id),
            payment_method: "bank_transfer".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(checkout.transaction.status, TransactionStatus::Pending);

    // 2. Gateway notification arrives
    let payload = signed_notification(&checkout.transaction.order_ref, "settlement", "250000.00");
    let result = harness
        .receive
        .handle(ReceiveCallbackCommand { payload })
        .await
        .unwrap();
    assert_eq!(result, WebhookResult::Processed);

    // 3. Worker applies the callback
    harness.worker.poll_once().await.unwrap();

    let paid = harness
        .transactions
        .find_by_order_ref(&checkout.transaction.order_ref)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(paid.status, TransactionStatus::Paid);
    assert!(paid.paid_at.is_some());

    assert!(harness
        .enrollments
        .find_by_user_and_course(&student, &course.id)
        .await
        .unwrap()
        .is_some());

    // 4. Worker delivers the queued confirmation
    assert_eq!(
        harness
            .job_queue
            .jobs_of_kind(JobKind::SendPaymentConfirmation)
            .len(),
        1
    );
    harness.worker.poll_once().await.unwrap();

    let sent = harness.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "student@example.com");
    assert!(sent[0].subject.contains(&checkout.transaction.order_ref));
}

#[tokio::test]
async fn duplicate_notification_processes_once() {
    let harness = harness();
    let course = seed_published_course(&harness, 250_000).await;
    let student = UserId::new();

    let checkout = harness
        .checkout
        .handle(CreateCheckoutCommand {
            user_id: student,
            email: "student@example.com".to_string(),
            item: CheckoutItem::Course(course.id),
            payment_method: "bank_transfer".to_string(),
        })
        .await
        .unwrap();

    let payload = signed_notification(&checkout.transaction.order_ref, "settlement", "250000.00");
    let first = harness
        .receive
        .handle(ReceiveCallbackCommand {
            payload: payload.clone(),
        })
        .await
        .unwrap();
    let second = harness
        .receive
        .handle(ReceiveCallbackCommand { payload })
        .await
        .unwrap();

    assert_eq!(first, WebhookResult::Processed);
    assert_eq!(second, WebhookResult::AlreadyProcessed);
    assert_eq!(harness.webhook_events.record_count(), 1);

    // Drain everything; exactly one confirmation goes out.
    harness.worker.poll_once().await.unwrap();
    harness.worker.poll_once().await.unwrap();
    assert_eq!(harness.mailer.sent().len(), 1);
}

#[tokio::test]
async fn deny_cancels_without_enrollment_or_email() {
    let harness = harness();
    let course = seed_published_course(&harness, 250_000).await;
    let student = UserId::new();

    let checkout = harness
        .checkout
        .handle(CreateCheckoutCommand {
            user_id: student,
            email: "student@example.com".to_string(),
            item: CheckoutItem::Course(course.id),
            payment_method: "credit_card".to_string(),
        })
        .await
        .unwrap();

    let payload = signed_notification(&checkout.transaction.order_ref, "deny", "250000.00");
    harness
        .receive
        .handle(ReceiveCallbackCommand { payload })
        .await
        .unwrap();
    harness.worker.poll_once().await.unwrap();

    let cancelled = harness
        .transactions
        .find_by_order_ref(&checkout.transaction.order_ref)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cancelled.status, TransactionStatus::Cancelled);

    assert!(harness
        .enrollments
        .find_by_user_and_course(&student, &course.id)
        .await
        .unwrap()
        .is_none());
    harness.worker.poll_once().await.unwrap();
    assert!(harness.mailer.sent().is_empty());
}

#[tokio::test]
async fn pending_then_settlement_progression_pays_once() {
    let harness = harness();
    let course = seed_published_course(&harness, 250_000).await;
    let student = UserId::new();

    let checkout = harness
        .checkout
        .handle(CreateCheckoutCommand {
            user_id: student,
            email: "student@example.com".to_string(),
            item: CheckoutItem::Course(course.id),
            payment_method: "bank_transfer".to_string(),
        })
        .await
        .unwrap();
    let order_ref = checkout.transaction.order_ref.clone();

    // Gateway first reports pending, then settlement.
    harness
        .receive
        .handle(ReceiveCallbackCommand {
            payload: signed_notification(&order_ref, "pending", "250000.00"),
        })
        .await
        .unwrap();
    harness.worker.poll_once().await.unwrap();

    let still_pending = harness
        .transactions
        .find_by_order_ref(&order_ref)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(still_pending.status, TransactionStatus::Pending);

    harness
        .receive
        .handle(ReceiveCallbackCommand {
            payload: signed_notification(&order_ref, "settlement", "250000.00"),
        })
        .await
        .unwrap();
    harness.worker.poll_once().await.unwrap();
    harness.worker.poll_once().await.unwrap();

    let paid = harness
        .transactions
        .find_by_order_ref(&order_ref)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(paid.status, TransactionStatus::Paid);
    assert_eq!(harness.mailer.sent().len(), 1);
}
