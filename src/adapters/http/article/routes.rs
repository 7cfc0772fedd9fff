//! Axum router for article endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    archive_article, create_article, get_article, list_articles, list_my_articles,
    publish_article, update_article,
};

/// Create the article API router.
///
/// # Routes
///
/// - `GET /` - list published articles (public)
/// - `GET /:id` - article by id or slug (public; drafts author-only)
/// - `POST /` - create a draft (mentor/admin)
/// - `PUT /:id` - update content (author/admin)
/// - `POST /:id/publish` - publish (author/admin)
/// - `POST /:id/archive` - archive (author/admin)
pub fn article_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_articles).post(create_article))
        .route("/mine", get(list_my_articles))
        .route("/:id", get(get_article).put(update_article))
        .route("/:id/publish", post(publish_article))
        .route("/:id/archive", post(archive_article))
}
