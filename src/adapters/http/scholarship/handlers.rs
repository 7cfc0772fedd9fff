//! HTTP handlers for scholarship endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::scholarship::{
    ApplyScholarshipCommand, CloseScholarshipCommand, CreateScholarshipCommand, Decision,
    DecideApplicationCommand,
};
use crate::domain::foundation::{ApplicationId, CourseId, ScholarshipId};

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    ApplicationListResponse, ApplicationResponse, ApplyRequest, CreateScholarshipRequest,
    ScholarshipListResponse, ScholarshipResponse,
};

/// GET /api/scholarships - list open programs
pub async fn list_scholarships(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let scholarships = state.scholarships.list_open().await?;
    let response = ScholarshipListResponse {
        scholarships: scholarships
            .into_iter()
            .map(ScholarshipResponse::from)
            .collect(),
    };
    Ok(Json(response))
}

/// POST /api/scholarships - open a program (admin)
pub async fn create_scholarship(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CreateScholarshipRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let course_id: CourseId = request
        .course_id
        .parse()
        .map_err(|_| ApiError::bad_request("course_id must be a UUID"))?;

    let handler = state.create_scholarship_handler();
    let scholarship = handler
        .handle(CreateScholarshipCommand {
            role: user.role,
            name: request.name,
            description: request.description,
            course_id,
            quota: request.quota,
            opens_at: request.opens_at,
            closes_at: request.closes_at,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ScholarshipResponse::from(scholarship))))
}

/// POST /api/scholarships/:id/close - close a program (admin)
pub async fn close_scholarship(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(scholarship_id): Path<ScholarshipId>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.close_scholarship_handler();
    let scholarship = handler
        .handle(CloseScholarshipCommand {
            scholarship_id,
            user_id: user.user_id,
            role: user.role,
            close: true,
        })
        .await?;

    Ok(Json(ScholarshipResponse::from(scholarship)))
}

/// POST /api/scholarships/:id/applications - apply to a program
pub async fn apply(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(scholarship_id): Path<ScholarshipId>,
    Json(request): Json<ApplyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.apply_scholarship_handler();
    let application = handler
        .handle(ApplyScholarshipCommand {
            scholarship_id,
            user_id: user.user_id,
            essay: request.essay,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApplicationResponse::from(application))))
}

/// GET /api/scholarships/:id/applications - review queue (admin)
pub async fn list_applications(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(scholarship_id): Path<ScholarshipId>,
) -> Result<impl IntoResponse, ApiError> {
    user.role.require_admin()?;

    let applications = state.scholarships.list_applications(&scholarship_id).await?;
    let response = ApplicationListResponse {
        applications: applications
            .into_iter()
            .map(ApplicationResponse::from)
            .collect(),
    };
    Ok(Json(response))
}

/// POST /api/applications/:id/approve - approve an application (admin)
pub async fn approve_application(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(application_id): Path<ApplicationId>,
) -> Result<impl IntoResponse, ApiError> {
    decide(state, user, application_id, Decision::Approve).await
}

/// POST /api/applications/:id/reject - reject an application (admin)
pub async fn reject_application(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(application_id): Path<ApplicationId>,
) -> Result<impl IntoResponse, ApiError> {
    decide(state, user, application_id, Decision::Reject).await
}

async fn decide(
    state: AppState,
    user: crate::domain::foundation::AuthenticatedUser,
    application_id: ApplicationId,
    decision: Decision,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let handler = state.decide_application_handler();
    let application = handler
        .handle(DecideApplicationCommand {
            application_id,
            decided_by: user.user_id,
            role: user.role,
            decision,
        })
        .await?;

    Ok(Json(ApplicationResponse::from(application)))
}
