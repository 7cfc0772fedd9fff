//! HTTP handlers for profile endpoints.

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::application::handlers::user::UpdateProfileCommand;

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    AchievementListResponse, AchievementResponse, ProfileResponse, UpdateProfileRequest,
};

/// GET /api/profile - the caller's profile
///
/// Creates the profile on first touch and captures the token email so
/// notification jobs have an address on file.
pub async fn get_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    state
        .progression
        .attach_email(&user.user_id, &user.email)
        .await?;
    let profile = state.progression.get_or_create(&user.user_id).await?;
    Ok(Json(ProfileResponse::from(profile)))
}

/// PUT /api/profile - update the caller's profile
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.update_profile_handler();
    let profile = handler
        .handle(UpdateProfileCommand {
            user_id: user.user_id,
            display_name: request.display_name,
            bio: request.bio,
            avatar: request.avatar,
        })
        .await?;

    Ok(Json(ProfileResponse::from(profile)))
}

/// GET /api/profile/achievements - the caller's achievements
pub async fn list_achievements(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let achievements = state.profiles.list_achievements(&user.user_id).await?;
    let response = AchievementListResponse {
        achievements: achievements
            .into_iter()
            .map(AchievementResponse::from)
            .collect(),
    };
    Ok(Json(response))
}
