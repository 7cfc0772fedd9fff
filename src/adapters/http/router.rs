//! Top-level application router.
//!
//! Mounts every context router under `/api`, wires the auth middleware and
//! the tower-http layers (tracing, timeout, request ids, compression).

use std::time::Duration;

use axum::{middleware, routing::get, Json, Router};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::article::article_routes;
use super::billing::{
    checkout_routes, plan_routes, subscription_routes, transaction_routes, webhook_routes,
};
use super::catalog::catalog_routes;
use super::enrollment::enrollment_routes;
use super::mentoring::mentoring_routes;
use super::middleware::{auth_middleware, AuthState};
use super::profile::profile_routes;
use super::scholarship::{application_routes, scholarship_routes};
use super::state::AppState;

/// GET /health - liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Builds the complete application router.
pub fn build_router(
    state: AppState,
    auth: AuthState,
    request_timeout: Duration,
) -> Router {
    let api = Router::new()
        .nest("/courses", catalog_routes())
        .nest("/enrollments", enrollment_routes())
        .nest("/mentoring", mentoring_routes())
        .nest("/scholarships", scholarship_routes())
        .nest("/applications", application_routes())
        .nest("/checkout", checkout_routes())
        .nest("/plans", plan_routes())
        .nest("/subscription", subscription_routes())
        .nest("/transactions", transaction_routes())
        .nest("/articles", article_routes())
        .nest("/profile", profile_routes())
        .nest("/webhooks", webhook_routes());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
        .layer(middleware::from_fn_with_state(auth, auth_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CompressionLayer::new())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::adapters::auth::MockTokenVerifier;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::gateway::MockPaymentGateway;
    use crate::adapters::memory::{
        InMemoryArticles, InMemoryCourses, InMemoryEnrollments, InMemoryJobQueue,
        InMemoryMentoringSessions, InMemoryProfiles, InMemoryScholarships, InMemorySubscriptions,
        InMemoryTransactions, InMemoryWebhookEvents,
    };
    use crate::application::handlers::user::ProgressionService;
    use crate::domain::billing::NotificationVerifier;

    fn test_state() -> AppState {
        let profiles = Arc::new(InMemoryProfiles::new());
        AppState {
            courses: Arc::new(InMemoryCourses::new()),
            enrollments: Arc::new(InMemoryEnrollments::new()),
            mentoring_sessions: Arc::new(InMemoryMentoringSessions::new()),
            scholarships: Arc::new(InMemoryScholarships::new()),
            subscriptions: Arc::new(InMemorySubscriptions::new()),
            transactions: Arc::new(InMemoryTransactions::new()),
            articles: Arc::new(InMemoryArticles::new()),
            profiles: profiles.clone(),
            webhook_events: Arc::new(InMemoryWebhookEvents::new()),
            job_queue: Arc::new(InMemoryJobQueue::new()),
            payment_gateway: Arc::new(MockPaymentGateway::new()),
            event_publisher: Arc::new(InMemoryEventBus::new()),
            notification_verifier: Arc::new(NotificationVerifier::new("test-key")),
            progression: Arc::new(ProgressionService::new(profiles)),
            payment_expiry_hours: 24,
            job_max_attempts: 5,
        }
    }

    #[test]
    fn router_assembles_without_panicking() {
        let _router = build_router(
            test_state(),
            Arc::new(MockTokenVerifier::new()),
            Duration::from_secs(30),
        );
    }
}
