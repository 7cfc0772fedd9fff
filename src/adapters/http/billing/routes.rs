//! Axum routers for billing endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    attach_proof, cancel_subscription, create_checkout, get_subscription, get_transaction,
    handle_payment_webhook, list_plans, list_transactions,
};

/// Create the checkout router, mounted at `/api/checkout`.
pub fn checkout_routes() -> Router<AppState> {
    Router::new().route("/", post(create_checkout))
}

/// Create the plan router, mounted at `/api/plans`.
pub fn plan_routes() -> Router<AppState> {
    Router::new().route("/", get(list_plans))
}

/// Create the subscription router, mounted at `/api/subscription`.
///
/// # Routes (all require authentication)
///
/// - `GET /` - the caller's live subscription
/// - `POST /cancel` - cancel at period end
pub fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_subscription))
        .route("/cancel", post(cancel_subscription))
}

/// Create the transaction router, mounted at `/api/transactions`.
///
/// # Routes (all require authentication)
///
/// - `GET /` - list the caller's transactions
/// - `GET /:id` - transaction details (owner/admin)
/// - `POST /:id/proof` - attach proof of payment (owner)
pub fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transactions))
        .route("/:id", get(get_transaction))
        .route("/:id/proof", post(attach_proof))
}

/// Create the webhook router, mounted at `/api/webhooks`.
///
/// Separate from the authenticated API: notifications are verified by
/// signature, not bearer token.
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/payment", post(handle_payment_webhook))
}
