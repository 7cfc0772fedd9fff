//! HTTP handlers for enrollment endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::enrollment::{
    EnrollFreeCommand, SubmitReportCommand, UpdateProgressCommand,
};
use crate::domain::foundation::{CourseId, EnrollmentId};

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    EnrollRequest, EnrollmentListResponse, EnrollmentResponse, ReportSubmissionResponse,
    UpdateProgressRequest,
};

/// GET /api/enrollments - list the caller's enrollments
pub async fn list_enrollments(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let enrollments = state.enrollments.list_by_user(&user.user_id).await?;
    let response = EnrollmentListResponse {
        enrollments: enrollments
            .into_iter()
            .map(EnrollmentResponse::from)
            .collect(),
    };
    Ok(Json(response))
}

/// POST /api/enrollments - enroll into a free course
pub async fn enroll(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<EnrollRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let course_id: CourseId = request
        .course_id
        .parse()
        .map_err(|_| ApiError::bad_request("course_id must be a UUID"))?;

    let handler = state.enroll_free_handler();
    let enrollment = handler
        .handle(EnrollFreeCommand {
            user_id: user.user_id,
            course_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(EnrollmentResponse::from(enrollment))))
}

/// PATCH /api/enrollments/:id/progress - update completion progress
pub async fn update_progress(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(enrollment_id): Path<EnrollmentId>,
    Json(request): Json<UpdateProgressRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.update_progress_handler();
    let enrollment = handler
        .handle(UpdateProgressCommand {
            enrollment_id,
            user_id: user.user_id,
            progress: request.progress,
        })
        .await?;

    Ok(Json(EnrollmentResponse::from(enrollment)))
}

/// POST /api/enrollments/:id/reports - submit a progress report
pub async fn submit_report(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(enrollment_id): Path<EnrollmentId>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.submit_report_handler();
    let result = handler
        .handle(SubmitReportCommand {
            enrollment_id,
            user_id: user.user_id,
        })
        .await?;

    let response = ReportSubmissionResponse {
        submitted_state: result.state,
        enrollment: EnrollmentResponse::from(result.enrollment),
    };
    Ok((StatusCode::CREATED, Json(response)))
}
