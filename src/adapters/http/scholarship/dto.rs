//! HTTP DTOs for scholarship endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::scholarship::{
    ApplicationStatus, Scholarship, ScholarshipApplication, ScholarshipStatus,
};

/// Request to open a scholarship program (admin).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScholarshipRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub course_id: String,
    pub quota: u32,
    pub opens_at: Timestamp,
    pub closes_at: Timestamp,
}

/// Request to apply to a program.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyRequest {
    pub essay: String,
}

/// Scholarship representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ScholarshipResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub course_id: String,
    pub quota: u32,
    pub awarded: u32,
    pub opens_at: String,
    pub closes_at: String,
    pub status: ScholarshipStatus,
}

impl From<Scholarship> for ScholarshipResponse {
    fn from(scholarship: Scholarship) -> Self {
        Self {
            id: scholarship.id.to_string(),
            name: scholarship.name,
            description: scholarship.description,
            course_id: scholarship.course_id.to_string(),
            quota: scholarship.quota,
            awarded: scholarship.awarded,
            opens_at: scholarship.opens_at.to_rfc3339(),
            closes_at: scholarship.closes_at.to_rfc3339(),
            status: scholarship.status,
        }
    }
}

/// Scholarship list response.
#[derive(Debug, Clone, Serialize)]
pub struct ScholarshipListResponse {
    pub scholarships: Vec<ScholarshipResponse>,
}

/// Application representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationResponse {
    pub id: String,
    pub scholarship_id: String,
    pub user_id: String,
    pub status: ApplicationStatus,
    pub submitted_at: String,
    pub decided_at: Option<String>,
}

impl From<ScholarshipApplication> for ApplicationResponse {
    fn from(application: ScholarshipApplication) -> Self {
        Self {
            id: application.id.to_string(),
            scholarship_id: application.scholarship_id.to_string(),
            user_id: application.user_id.to_string(),
            status: application.status,
            submitted_at: application.submitted_at.to_rfc3339(),
            decided_at: application.decided_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Application list response (admin review queue).
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationListResponse {
    pub applications: Vec<ApplicationResponse>,
}
