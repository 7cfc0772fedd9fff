//! Learnforge server binary.
//!
//! Wires configuration, the Postgres adapters, the background workers and
//! the axum router, then serves until SIGINT.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use learnforge::adapters::auth::JwtTokenVerifier;
use learnforge::adapters::email::ApiMailer;
use learnforge::adapters::events::TracingEventPublisher;
use learnforge::adapters::gateway::GatewayClient;
use learnforge::adapters::http::{build_router, AppState};
use learnforge::adapters::jobs::{
    JobDispatcher, JobWorker, MaintenanceService, PaymentConfirmationJob, ProcessCallbackJob,
    ReportReminderJob,
};
use learnforge::adapters::postgres::{
    connect_pool, PostgresArticleRepository, PostgresCourseRepository,
    PostgresEnrollmentRepository, PostgresJobQueue, PostgresMentoringSessionRepository,
    PostgresProfileRepository, PostgresScholarshipRepository, PostgresSubscriptionRepository,
    PostgresTransactionRepository, PostgresWebhookEventRepository,
};
use learnforge::application::handlers::billing::ApplyCallbackHandler;
use learnforge::application::handlers::enrollment::GrantEnrollmentHandler;
use learnforge::application::handlers::user::ProgressionService;
use learnforge::config::AppConfig;
use learnforge::domain::billing::NotificationVerifier;
use learnforge::ports::{EventPublisher, JobQueue, Mailer, PaymentGateway, TokenVerifier};

use secrecy::ExposeSecret;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "learnforge=info,tower_http=info".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let pool = connect_pool(&config.database).await?;

    // Repositories
    let courses = Arc::new(PostgresCourseRepository::new(pool.clone()));
    let enrollments = Arc::new(PostgresEnrollmentRepository::new(pool.clone()));
    let mentoring_sessions = Arc::new(PostgresMentoringSessionRepository::new(pool.clone()));
    let scholarships = Arc::new(PostgresScholarshipRepository::new(pool.clone()));
    let subscriptions = Arc::new(PostgresSubscriptionRepository::new(pool.clone()));
    let transactions = Arc::new(PostgresTransactionRepository::new(pool.clone()));
    let articles = Arc::new(PostgresArticleRepository::new(pool.clone()));
    let profiles = Arc::new(PostgresProfileRepository::new(pool.clone()));
    let webhook_events = Arc::new(PostgresWebhookEventRepository::new(pool.clone()));
    let job_queue: Arc<dyn JobQueue> = Arc::new(PostgresJobQueue::new(pool.clone()));

    // Integrations
    let payment_gateway: Arc<dyn PaymentGateway> = Arc::new(GatewayClient::new(&config.payment));
    let mailer: Arc<dyn Mailer> = Arc::new(ApiMailer::new(&config.email));
    let event_publisher: Arc<dyn EventPublisher> = Arc::new(TracingEventPublisher::new());
    let token_verifier: Arc<dyn TokenVerifier> = Arc::new(JwtTokenVerifier::new(&config.auth));
    let notification_verifier = Arc::new(NotificationVerifier::new(
        config.payment.server_key.expose_secret().clone(),
    ));
    let progression = Arc::new(ProgressionService::new(profiles.clone()));

    let state = AppState {
        courses: courses.clone(),
        enrollments: enrollments.clone(),
        mentoring_sessions,
        scholarships,
        subscriptions: subscriptions.clone(),
        transactions: transactions.clone(),
        articles,
        profiles: profiles.clone(),
        webhook_events: webhook_events.clone(),
        job_queue: job_queue.clone(),
        payment_gateway,
        event_publisher: event_publisher.clone(),
        notification_verifier,
        progression: progression.clone(),
        payment_expiry_hours: config.payment.expiry_hours,
        job_max_attempts: config.jobs.max_attempts,
    };

    // Background worker wiring
    let grant_enrollment = Arc::new(GrantEnrollmentHandler::new(
        enrollments.clone(),
        progression.clone(),
        event_publisher.clone(),
    ));
    let apply_callback = Arc::new(ApplyCallbackHandler::new(
        transactions.clone(),
        subscriptions.clone(),
        grant_enrollment,
        job_queue.clone(),
        event_publisher.clone(),
        config.jobs.max_attempts,
    ));
    let dispatcher = JobDispatcher::new()
        .register(Arc::new(ProcessCallbackJob::new(apply_callback)))
        .register(Arc::new(PaymentConfirmationJob::new(mailer.clone())))
        .register(Arc::new(ReportReminderJob::new(mailer, profiles.clone())));
    let worker = Arc::new(JobWorker::new(
        job_queue.clone(),
        dispatcher,
        config.jobs.clone(),
    ));

    let maintenance = Arc::new(MaintenanceService::new(
        transactions,
        subscriptions,
        enrollments,
        webhook_events,
        job_queue,
        event_publisher,
        config.jobs.max_attempts,
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let worker_task = {
        let worker = worker.clone();
        let shutdown = shutdown_rx.clone();
        tokio::spawn(async move {
            if let Err(e) = worker.run(shutdown).await {
                tracing::error!(error = %e, "job worker stopped with error");
            }
        })
    };
    let maintenance_task = {
        let maintenance = maintenance.clone();
        let shutdown = shutdown_rx.clone();
        tokio::spawn(async move {
            if let Err(e) = maintenance.run(shutdown).await {
                tracing::error!(error = %e, "maintenance service stopped with error");
            }
        })
    };

    // HTTP server
    let router = build_router(
        state,
        token_verifier,
        Duration::from_secs(config.server.request_timeout_secs),
    );
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "learnforge listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    // Stop background services and let them drain.
    let _ = shutdown_tx.send(true);
    let _ = worker_task.await;
    let _ = maintenance_task.await;

    Ok(())
}
