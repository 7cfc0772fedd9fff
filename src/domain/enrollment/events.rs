//! Domain events emitted by the enrollment context.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CourseId, EnrollmentId, EventId, Timestamp, UserId};
use crate::domain_event;

/// A user was enrolled into a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentCreated {
    pub event_id: EventId,
    pub enrollment_id: EnrollmentId,
    pub user_id: UserId,
    pub course_id: CourseId,
    pub occurred_at: Timestamp,
}

domain_event!(
    EnrollmentCreated,
    event_type = "enrollment.created.v1",
    aggregate_id = enrollment_id,
    aggregate_type = "Enrollment",
    occurred_at = occurred_at,
    event_id = event_id
);

/// An enrollment reached 100 percent progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentCompleted {
    pub event_id: EventId,
    pub enrollment_id: EnrollmentId,
    pub user_id: UserId,
    pub course_id: CourseId,
    pub occurred_at: Timestamp,
}

domain_event!(
    EnrollmentCompleted,
    event_type = "enrollment.completed.v1",
    aggregate_id = enrollment_id,
    aggregate_type = "Enrollment",
    occurred_at = occurred_at,
    event_id = event_id
);

/// A progress report was submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReportSubmitted {
    pub event_id: EventId,
    pub enrollment_id: EnrollmentId,
    pub user_id: UserId,
    pub next_report_due: Option<Timestamp>,
    pub occurred_at: Timestamp,
}

domain_event!(
    ProgressReportSubmitted,
    event_type = "enrollment.report_submitted.v1",
    aggregate_id = enrollment_id,
    aggregate_type = "Enrollment",
    occurred_at = occurred_at,
    event_id = event_id
);
