//! SubmitReportHandler - command handler for progress report submissions.

use std::sync::Arc;

use crate::domain::enrollment::{Enrollment, EnrollmentError, ProgressReportSubmitted, ReportState};
use crate::domain::foundation::{
    EnrollmentId, EventId, OwnedByUser, SerializableDomainEvent, Timestamp, UserId,
};
use crate::domain::user::ExperienceSource;
use crate::ports::{EnrollmentRepository, EventPublisher};

use super::super::user::ProgressionService;

/// Command to submit a progress report.
#[derive(Debug, Clone)]
pub struct SubmitReportCommand {
    pub enrollment_id: EnrollmentId,
    pub user_id: UserId,
}

/// Result of a report submission.
#[derive(Debug, Clone)]
pub struct SubmitReportResult {
    pub enrollment: Enrollment,
    /// Schedule state the report was submitted in (on time, due, overdue).
    pub state: ReportState,
}

/// Handler for report submissions.
pub struct SubmitReportHandler {
    enrollments: Arc<dyn EnrollmentRepository>,
    progression: Arc<ProgressionService>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl SubmitReportHandler {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepository>,
        progression: Arc<ProgressionService>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            enrollments,
            progression,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: SubmitReportCommand) -> Result<SubmitReportResult, EnrollmentError> {
        let mut enrollment = self
            .enrollments
            .find_by_id(&cmd.enrollment_id)
            .await?
            .ok_or_else(|| EnrollmentError::not_found(cmd.enrollment_id))?;

        enrollment.check_ownership(&cmd.user_id)?;

        let now = Timestamp::now();
        let state = enrollment.submit_report(now)?;
        self.enrollments.update(&enrollment).await?;

        self.progression
            .grant_experience(&cmd.user_id, ExperienceSource::ProgressReport)
            .await
            .map_err(|e| EnrollmentError::infrastructure(e.to_string()))?;

        let event = ProgressReportSubmitted {
            event_id: EventId::new(),
            enrollment_id: enrollment.id,
            user_id: enrollment.user_id,
            next_report_due: enrollment.next_report_due,
            occurred_at: now,
        };
        self.event_publisher.publish(event.to_envelope()).await?;

        Ok(SubmitReportResult { enrollment, state })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{InMemoryEnrollments, InMemoryProfiles};
    use crate::domain::enrollment::REPORT_CADENCE_DAYS;
    use crate::domain::foundation::CourseId;

    #[tokio::test]
    async fn submission_advances_schedule_and_grants_experience() {
        let enrollments = Arc::new(InMemoryEnrollments::new());
        let profiles = Arc::new(InMemoryProfiles::new());
        let publisher = Arc::new(InMemoryEventBus::new());
        let handler = SubmitReportHandler::new(
            enrollments.clone(),
            Arc::new(ProgressionService::new(profiles.clone())),
            publisher.clone(),
        );

        let user = UserId::new();
        let enrollment = Enrollment::create(EnrollmentId::new(), user, CourseId::new());
        let first_due = enrollment.next_report_due.unwrap();
        enrollments.save(&enrollment).await.unwrap();

        let result = handler
            .handle(SubmitReportCommand {
                enrollment_id: enrollment.id,
                user_id: user,
            })
            .await
            .unwrap();

        // Submitted before the first due date: anchored on the due date.
        assert_eq!(result.state, ReportState::Upcoming);
        assert_eq!(
            result.enrollment.next_report_due.unwrap(),
            first_due.add_days(REPORT_CADENCE_DAYS)
        );
        assert_eq!(profiles.profile_of(&user).unwrap().experience, 10);
        assert_eq!(
            publisher.event_types(),
            vec!["enrollment.report_submitted.v1".to_string()]
        );
    }

    #[tokio::test]
    async fn non_owner_cannot_submit() {
        let enrollments = Arc::new(InMemoryEnrollments::new());
        let handler = SubmitReportHandler::new(
            enrollments.clone(),
            Arc::new(ProgressionService::new(Arc::new(InMemoryProfiles::new()))),
            Arc::new(InMemoryEventBus::new()),
        );

        let enrollment = Enrollment::create(EnrollmentId::new(), UserId::new(), CourseId::new());
        enrollments.save(&enrollment).await.unwrap();

        let err = handler
            .handle(SubmitReportCommand {
                enrollment_id: enrollment.id,
                user_id: UserId::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, EnrollmentError::Forbidden(_)));
    }
}
