//! HTTP DTOs for enrollment endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::enrollment::{Enrollment, EnrollmentStatus, ReportState};
use crate::domain::foundation::Timestamp;

/// Request to enroll into a free course.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrollRequest {
    pub course_id: String,
}

/// Request to update progress.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProgressRequest {
    /// Completion percent, 0-100.
    pub progress: u8,
}

/// Enrollment representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentResponse {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub status: EnrollmentStatus,
    pub progress: u8,
    pub report_state: ReportState,
    pub next_report_due: Option<String>,
    pub enrolled_at: String,
    pub completed_at: Option<String>,
}

impl From<Enrollment> for EnrollmentResponse {
    fn from(enrollment: Enrollment) -> Self {
        let report_state = enrollment.report_state(Timestamp::now());
        Self {
            id: enrollment.id.to_string(),
            user_id: enrollment.user_id.to_string(),
            course_id: enrollment.course_id.to_string(),
            status: enrollment.status,
            progress: enrollment.progress,
            report_state,
            next_report_due: enrollment.next_report_due.map(|t| t.to_rfc3339()),
            enrolled_at: enrollment.enrolled_at.to_rfc3339(),
            completed_at: enrollment.completed_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Enrollment list response.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentListResponse {
    pub enrollments: Vec<EnrollmentResponse>,
}

/// Response for a report submission.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSubmissionResponse {
    /// Schedule state the report was submitted in.
    pub submitted_state: ReportState,
    #[serde(flatten)]
    pub enrollment: EnrollmentResponse,
}
