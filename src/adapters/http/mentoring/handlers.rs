//! HTTP handlers for mentoring endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::mentoring::{
    CancelSessionCommand, CompleteSessionCommand, ConfirmSessionCommand, RequestSessionCommand,
};
use crate::domain::foundation::{MentoringSessionId, UserId};

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    CompleteSessionRequest, RequestSessionRequest, SessionListResponse, SessionResponse,
};

/// GET /api/mentoring - list the caller's sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let sessions = state
        .mentoring_sessions
        .list_for_participant(&user.user_id)
        .await?;
    let response = SessionListResponse {
        sessions: sessions.into_iter().map(SessionResponse::from).collect(),
    };
    Ok(Json(response))
}

/// POST /api/mentoring - request a session
pub async fn request_session(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<RequestSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mentor_id: UserId = request
        .mentor_id
        .parse()
        .map_err(|_| ApiError::bad_request("mentor_id must be a UUID"))?;
    let course_id = request
        .course_id
        .map(|id| id.parse())
        .transpose()
        .map_err(|_| ApiError::bad_request("course_id must be a UUID"))?;

    let handler = state.request_session_handler();
    let session = handler
        .handle(RequestSessionCommand {
            student_id: user.user_id,
            mentor_id,
            course_id,
            topic: request.topic,
            scheduled_at: request.scheduled_at,
            duration_minutes: request.duration_minutes,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(session))))
}

/// POST /api/mentoring/:id/confirm - mentor confirms
pub async fn confirm_session(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<MentoringSessionId>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.confirm_session_handler();
    let session = handler
        .handle(ConfirmSessionCommand {
            session_id,
            user_id: user.user_id,
            role: user.role,
        })
        .await?;

    Ok(Json(SessionResponse::from(session)))
}

/// POST /api/mentoring/:id/complete - mentor completes
pub async fn complete_session(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<MentoringSessionId>,
    Json(request): Json<CompleteSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.complete_session_handler();
    let session = handler
        .handle(CompleteSessionCommand {
            session_id,
            user_id: user.user_id,
            role: user.role,
            notes: request.notes,
        })
        .await?;

    Ok(Json(SessionResponse::from(session)))
}

/// POST /api/mentoring/:id/cancel - either participant cancels
pub async fn cancel_session(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<MentoringSessionId>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.cancel_session_handler();
    let session = handler
        .handle(CancelSessionCommand {
            session_id,
            user_id: user.user_id,
            role: user.role,
        })
        .await?;

    Ok(Json(SessionResponse::from(session)))
}
