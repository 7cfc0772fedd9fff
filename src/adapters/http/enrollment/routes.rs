//! Axum router for enrollment endpoints.

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{enroll, list_enrollments, submit_report, update_progress};

/// Create the enrollment API router.
///
/// # Routes (all require authentication)
///
/// - `GET /` - list the caller's enrollments
/// - `POST /` - enroll into a free course
/// - `PATCH /:id/progress` - update completion progress
/// - `POST /:id/reports` - submit a progress report
pub fn enrollment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_enrollments).post(enroll))
        .route("/:id/progress", patch(update_progress))
        .route("/:id/reports", post(submit_report))
}
