//! HTTP handlers for catalog endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::catalog::{
    ArchiveCourseCommand, CreateCourseCommand, PublishCourseCommand, UpdateCourseCommand,
};
use crate::domain::catalog::{CatalogError, CourseStatus};
use crate::domain::foundation::{CourseId, Role};

use super::super::error::ApiError;
use super::super::middleware::{OptionalAuth, RequireAuth};
use super::super::state::AppState;
use super::dto::{CourseListResponse, CourseResponse, CreateCourseRequest, UpdateCourseRequest};

/// GET /api/courses - list published courses
pub async fn list_courses(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let courses = state.courses.list_published().await?;
    let response = CourseListResponse {
        courses: courses.into_iter().map(CourseResponse::from).collect(),
    };
    Ok(Json(response))
}

/// GET /api/courses/mine - list the caller's authored courses (mentor/admin)
pub async fn list_my_courses(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    user.role.require_mentor()?;

    let courses = state.courses.list_by_mentor(&user.user_id).await?;
    let response = CourseListResponse {
        courses: courses.into_iter().map(CourseResponse::from).collect(),
    };
    Ok(Json(response))
}

/// GET /api/courses/:id - get a course by id or slug
///
/// Drafts and archived courses are visible only to their mentor and admins.
pub async fn get_course(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(id_or_slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    // Frontends link by slug; internal tools by id. Accept both.
    let course = match id_or_slug.parse::<CourseId>() {
        Ok(id) => state.courses.find_by_id(&id).await?,
        Err(_) => state.courses.find_by_slug(&id_or_slug).await?,
    }
    .ok_or_else(|| CatalogError::not_found_by_slug(&id_or_slug))?;

    if course.status != CourseStatus::Published {
        let can_see = user
            .as_ref()
            .map(|u| u.role == Role::Admin || u.user_id == course.mentor_id)
            .unwrap_or(false);
        if !can_see {
            return Err(CatalogError::not_found_by_slug(&id_or_slug).into());
        }
    }

    Ok(Json(CourseResponse::from(course)))
}

/// POST /api/courses - create a draft course (mentor/admin)
pub async fn create_course(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CreateCourseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.create_course_handler();
    let course = handler
        .handle(CreateCourseCommand {
            mentor_id: user.user_id,
            role: user.role,
            title: request.title,
            slug: request.slug,
            description: request.description,
            price: request.price,
            level: request.level,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CourseResponse::from(course))))
}

/// PUT /api/courses/:id - update course metadata (owner/admin)
pub async fn update_course(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(course_id): Path<CourseId>,
    Json(request): Json<UpdateCourseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.update_course_handler();
    let course = handler
        .handle(UpdateCourseCommand {
            course_id,
            user_id: user.user_id,
            role: user.role,
            title: request.title,
            description: request.description,
            price: request.price,
            level: request.level,
        })
        .await?;

    Ok(Json(CourseResponse::from(course)))
}

/// POST /api/courses/:id/publish - publish a course (owner/admin)
pub async fn publish_course(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(course_id): Path<CourseId>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.publish_course_handler();
    let course = handler
        .handle(PublishCourseCommand {
            course_id,
            user_id: user.user_id,
            role: user.role,
        })
        .await?;

    Ok(Json(CourseResponse::from(course)))
}

/// POST /api/courses/:id/archive - archive a course (owner/admin)
pub async fn archive_course(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(course_id): Path<CourseId>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.archive_course_handler();
    let course = handler
        .handle(ArchiveCourseCommand {
            course_id,
            user_id: user.user_id,
            role: user.role,
        })
        .await?;

    Ok(Json(CourseResponse::from(course)))
}
