//! HTTP DTOs for mentoring endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::mentoring::{MentoringSession, SessionStatus};

/// Request to book a mentoring session.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestSessionRequest {
    pub mentor_id: String,
    #[serde(default)]
    pub course_id: Option<String>,
    pub topic: String,
    /// ISO 8601 start time.
    pub scheduled_at: Timestamp,
    pub duration_minutes: u16,
}

/// Request to complete a session.
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteSessionRequest {
    #[serde(default)]
    pub notes: Option<String>,
}

/// Session representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub mentor_id: String,
    pub student_id: String,
    pub course_id: Option<String>,
    pub topic: String,
    pub scheduled_at: String,
    pub duration_minutes: u16,
    pub status: SessionStatus,
    pub notes: Option<String>,
}

impl From<MentoringSession> for SessionResponse {
    fn from(session: MentoringSession) -> Self {
        Self {
            id: session.id.to_string(),
            mentor_id: session.mentor_id.to_string(),
            student_id: session.student_id.to_string(),
            course_id: session.course_id.map(|id| id.to_string()),
            topic: session.topic,
            scheduled_at: session.scheduled_at.to_rfc3339(),
            duration_minutes: session.duration_minutes,
            status: session.status,
            notes: session.notes,
        }
    }
}

/// Session list response.
#[derive(Debug, Clone, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionResponse>,
}
