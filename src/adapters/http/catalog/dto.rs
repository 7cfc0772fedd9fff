//! HTTP DTOs for catalog endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Course, CourseLevel, CourseStatus};

/// Request to create a course.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseRequest {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    /// Price in minor currency units; 0 = free.
    pub price: i64,
    pub level: CourseLevel,
}

/// Request to update course metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCourseRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: i64,
    pub level: CourseLevel,
}

/// Course representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct CourseResponse {
    pub id: String,
    pub mentor_id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub price: i64,
    pub level: CourseLevel,
    pub status: CourseStatus,
    pub created_at: String,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id.to_string(),
            mentor_id: course.mentor_id.to_string(),
            title: course.title,
            slug: course.slug,
            description: course.description,
            price: course.price,
            level: course.level,
            status: course.status,
            created_at: course.created_at.to_rfc3339(),
        }
    }
}

/// Course list response.
#[derive(Debug, Clone, Serialize)]
pub struct CourseListResponse {
    pub courses: Vec<CourseResponse>,
}
