//! Axum router for mentoring endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    cancel_session, complete_session, confirm_session, list_sessions, request_session,
};

/// Create the mentoring API router.
///
/// # Routes (all require authentication)
///
/// - `GET /` - list the caller's sessions
/// - `POST /` - request a session (student)
/// - `POST /:id/confirm` - confirm (mentor)
/// - `POST /:id/complete` - complete with notes (mentor)
/// - `POST /:id/cancel` - cancel (either participant)
pub fn mentoring_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sessions).post(request_session))
        .route("/:id/confirm", post(confirm_session))
        .route("/:id/complete", post(complete_session))
        .route("/:id/cancel", post(cancel_session))
}
