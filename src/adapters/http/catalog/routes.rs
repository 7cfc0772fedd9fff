//! Axum router for catalog endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    archive_course, create_course, get_course, list_courses, list_my_courses, publish_course,
    update_course,
};

/// Create the catalog API router.
///
/// # Routes
///
/// - `GET /` - list published courses (public)
/// - `GET /mine` - the caller's authored courses (mentor/admin)
/// - `GET /:id` - course details by id or slug (public; drafts owner-only)
/// - `POST /` - create a draft course (mentor/admin)
/// - `PUT /:id` - update metadata (owner/admin)
/// - `POST /:id/publish` - publish (owner/admin)
/// - `POST /:id/archive` - archive (owner/admin)
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/mine", get(list_my_courses))
        .route("/:id", get(get_course).put(update_course))
        .route("/:id/publish", post(publish_course))
        .route("/:id/archive", post(archive_course))
}
