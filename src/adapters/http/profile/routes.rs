//! Axum router for profile endpoints.

use axum::{routing::get, Router};

use super::super::state::AppState;
use super::handlers::{get_profile, list_achievements, update_profile};

/// Create the profile API router.
///
/// # Routes (all require authentication)
///
/// - `GET /` - the caller's profile (created on first touch)
/// - `PUT /` - update display name, bio, avatar
/// - `GET /achievements` - the caller's achievements
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile).put(update_profile))
        .route("/achievements", get(list_achievements))
}
