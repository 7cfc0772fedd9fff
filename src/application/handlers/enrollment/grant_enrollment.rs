//! GrantEnrollmentHandler - creates enrollments for paid, scholarship and
//! free-course grants.
//!
//! This is the single path that turns an entitlement (paid transaction,
//! approved scholarship, free course) into an Enrollment. It is idempotent:
//! retried payment jobs must not fail because the first attempt already
//! enrolled the user.

use std::sync::Arc;

use crate::domain::enrollment::{Enrollment, EnrollmentCreated, EnrollmentError};
use crate::domain::foundation::{
    CourseId, EnrollmentId, EventId, SerializableDomainEvent, Timestamp, UserId,
};
use crate::domain::user::{AchievementKind, ExperienceSource};
use crate::ports::{EnrollmentRepository, EventPublisher};

use super::super::user::ProgressionService;

/// Command to grant an enrollment.
#[derive(Debug, Clone)]
pub struct GrantEnrollmentCommand {
    pub user_id: UserId,
    pub course_id: CourseId,
}

/// Result of a grant.
#[derive(Debug, Clone)]
pub struct GrantEnrollmentResult {
    pub enrollment: Enrollment,
    /// False when the user was already enrolled (idempotent re-grant).
    pub newly_created: bool,
}

/// Handler that creates enrollments and wires up progression side effects.
pub struct GrantEnrollmentHandler {
    enrollments: Arc<dyn EnrollmentRepository>,
    progression: Arc<ProgressionService>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl GrantEnrollmentHandler {
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

    pub async fn handle(
        &self,
        cmd: GrantEnrollmentCommand,
    ) -> Result<GrantEnrollmentResult, EnrollmentError> {
        if let Some(existing) = self
            .enrollments
            .find_by_user_and_course(&cmd.user_id, &cmd.course_id)
            .await?
        {
            return Ok(GrantEnrollmentResult {
                enrollment: existing,
                newly_created: false,
            });
        }

        let enrollment = Enrollment::create(EnrollmentId::new(), cmd.user_id, cmd.course_id);
        self.enrollments.save(&enrollment).await?;

        self.progression
            .grant_experience(&cmd.user_id, ExperienceSource::Enrollment)
            .await
            .map_err(|e| EnrollmentError::infrastructure(e.to_string()))?;
        self.progression
            .award(&cmd.user_id, AchievementKind::FirstEnrollment)
            .await
            .map_err(|e| EnrollmentError::infrastructure(e.to_string()))?;

        let event = EnrollmentCreated {
            event_id: EventId::new(),
            enrollment_id: enrollment.id,
            user_id: enrollment.user_id,
            course_id: enrollment.course_id,
            occurred_at: Timestamp::now(),
        };
        self.event_publisher.publish(event.to_envelope()).await?;

        Ok(GrantEnrollmentResult {
            enrollment,
            newly_created: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{InMemoryEnrollments, InMemoryProfiles};

    fn handler() -> (
        GrantEnrollmentHandler,
        Arc<InMemoryEnrollments>,
        Arc<InMemoryProfiles>,
        Arc<InMemoryEventBus>,
    ) {
        let enrollments = Arc::new(InMemoryEnrollments::new());
        let profiles = Arc::new(InMemoryProfiles::new());
        let publisher = Arc::new(InMemoryEventBus::new());
        let progression = Arc::new(ProgressionService::new(profiles.clone()));
        let handler = GrantEnrollmentHandler::new(
            enrollments.clone(),
            progression,
            publisher.clone(),
        );
        (handler, enrollments, profiles, publisher)
    }

    #[tokio::test]
    async fn grant_creates_enrollment_with_side_effects() {
        let (handler, enrollments, profiles, publisher) = handler();
        let user = UserId::new();
        let course = CourseId::new();

        let result = handler
            .handle(GrantEnrollmentCommand {
                user_id: user,
                course_id: course,
            })
            .await
            .unwrap();

        assert!(result.newly_created);
        assert!(enrollments
            .find_by_user_and_course(&user, &course)
            .await
            .unwrap()
            .is_some());

        // Enrollment grants 50 xp and the first-enrollment achievement.
        let profile = profiles.profile_of(&user).unwrap();
        assert_eq!(profile.experience, 50);
        assert_eq!(
            publisher.event_types(),
            vec!["enrollment.created.v1".to_string()]
        );
    }

    #[tokio::test]
    async fn regrant_is_idempotent() {
        let (handler, _, profiles, publisher) = handler();
        let cmd = GrantEnrollmentCommand {
            user_id: UserId::new(),
            course_id: CourseId::new(),
        };

        handler.handle(cmd.clone()).await.unwrap();
        let second = handler.handle(cmd.clone()).await.unwrap();

        assert!(!second.newly_created);
        // No double experience, no second event.
        assert_eq!(profiles.profile_of(&cmd.user_id).unwrap().experience, 50);
        assert_eq!(publisher.event_types().len(), 1);
    }
}
