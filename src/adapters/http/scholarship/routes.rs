//! Axum routers for scholarship endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    apply, approve_application, close_scholarship, create_scholarship, list_applications,
    list_scholarships, reject_application,
};

/// Create the scholarship API router.
///
/// # Routes
///
/// - `GET /` - list open programs (public)
/// - `POST /` - open a program (admin)
/// - `POST /:id/close` - close a program (admin)
/// - `POST /:id/applications` - apply (student)
/// - `GET /:id/applications` - review queue (admin)
pub fn scholarship_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_scholarships).post(create_scholarship))
        .route("/:id/close", post(close_scholarship))
        .route("/:id/applications", get(list_applications).post(apply))
}

/// Create the application decision router, mounted at `/api/applications`.
///
/// # Routes
///
/// - `POST /:id/approve` - approve (admin)
/// - `POST /:id/reject` - reject (admin)
pub fn application_routes() -> Router<AppState> {
    Router::new()
        .route("/:id/approve", post(approve_application))
        .route("/:id/reject", post(reject_application))
}
