//! UpdateProgressHandler - command handler for enrollment progress updates.

use std::sync::Arc;

use crate::domain::enrollment::{Enrollment, EnrollmentCompleted, EnrollmentError};
use crate::domain::foundation::{
    EnrollmentId, EventId, OwnedByUser, SerializableDomainEvent, Timestamp, UserId,
};
use crate::domain::user::{AchievementKind, ExperienceSource};
use crate::ports::{EnrollmentRepository, EventPublisher};

use super::super::user::ProgressionService;

/// Courses completed before the serial-learner achievement unlocks.
const SERIAL_LEARNER_THRESHOLD: u64 = 5;

/// Command to update enrollment progress.
#[derive(Debug, Clone)]
pub struct UpdateProgressCommand {
    pub enrollment_id: EnrollmentId,
    pub user_id: UserId,
    pub progress: u8,
}

/// Handler for progress updates and completion side effects.
pub struct UpdateProgressHandler {
    enrollments: Arc<dyn EnrollmentRepository>,
    progression: Arc<ProgressionService>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdateProgressHandler {
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

    pub async fn handle(&self, cmd: UpdateProgressCommand) -> Result<Enrollment, EnrollmentError> {
        let mut enrollment = self
            .enrollments
            .find_by_id(&cmd.enrollment_id)
            .await?
            .ok_or_else(|| EnrollmentError::not_found(cmd.enrollment_id))?;

        enrollment.check_ownership(&cmd.user_id)?;

        let completed = enrollment.update_progress(cmd.progress)?;
        self.enrollments.update(&enrollment).await?;

        if completed {
            self.on_completed(&enrollment).await?;
        }

        Ok(enrollment)
    }

    async fn on_completed(&self, enrollment: &Enrollment) -> Result<(), EnrollmentError> {
        self.progression
            .grant_experience(&enrollment.user_id, ExperienceSource::CourseCompletion)
            .await
            .map_err(|e| EnrollmentError::infrastructure(e.to_string()))?;
        self.progression
            .award(&enrollment.user_id, AchievementKind::CourseCompleted)
            .await
            .map_err(|e| EnrollmentError::infrastructure(e.to_string()))?;

        let completed_count = self
            .enrollments
            .count_completed_by_user(&enrollment.user_id)
            .await?;
        if completed_count >= SERIAL_LEARNER_THRESHOLD {
            self.progression
                .award(&enrollment.user_id, AchievementKind::FiveCoursesCompleted)
                .await
                .map_err(|e| EnrollmentError::infrastructure(e.to_string()))?;
        }

        let event = EnrollmentCompleted {
            event_id: EventId::new(),
            enrollment_id: enrollment.id,
            user_id: enrollment.user_id,
            course_id: enrollment.course_id,
            occurred_at: Timestamp::now(),
        };
        self.event_publisher.publish(event.to_envelope()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{InMemoryEnrollments, InMemoryProfiles};
    use crate::domain::enrollment::Enrollment;
    use crate::domain::foundation::CourseId;

    struct Fixture {
        handler: UpdateProgressHandler,
        enrollments: Arc<InMemoryEnrollments>,
        profiles: Arc<InMemoryProfiles>,
        publisher: Arc<InMemoryEventBus>,
    }

    fn fixture() -> Fixture {
        let enrollments = Arc::new(InMemoryEnrollments::new());
        let profiles = Arc::new(InMemoryProfiles::new());
        let publisher = Arc::new(InMemoryEventBus::new());
        let progression = Arc::new(ProgressionService::new(profiles.clone()));
        Fixture {
            handler: UpdateProgressHandler::new(
                enrollments.clone(),
                progression,
                publisher.clone(),
            ),
            enrollments,
            profiles,
            publisher,
        }
    }

    async fn seed_enrollment(fixture: &Fixture, user: UserId) -> Enrollment {
        let enrollment = Enrollment::create(EnrollmentId::new(), user, CourseId::new());
        fixture.enrollments.save(&enrollment).await.unwrap();
        enrollment
    }

    #[tokio::test]
    async fn owner_updates_progress() {
        let fixture = fixture();
        let user = UserId::new();
        let enrollment = seed_enrollment(&fixture, user).await;

        let updated = fixture
            .handler
            .handle(UpdateProgressCommand {
                enrollment_id: enrollment.id,
                user_id: user,
                progress: 60,
            })
            .await
            .unwrap();

        assert_eq!(updated.progress, 60);
        assert!(fixture.publisher.events().is_empty());
    }

    #[tokio::test]
    async fn non_owner_is_forbidden() {
        let fixture = fixture();
        let enrollment = seed_enrollment(&fixture, UserId::new()).await;

        let err = fixture
            .handler
            .handle(UpdateProgressCommand {
                enrollment_id: enrollment.id,
                user_id: UserId::new(),
                progress: 10,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, EnrollmentError::Forbidden(_)));
    }

    #[tokio::test]
    async fn completion_grants_experience_and_achievement() {
        let fixture = fixture();
        let user = UserId::new();
        let enrollment = seed_enrollment(&fixture, user).await;

        fixture
            .handler
            .handle(UpdateProgressCommand {
                enrollment_id: enrollment.id,
                user_id: user,
                progress: 100,
            })
            .await
            .unwrap();

        let profile = fixture.profiles.profile_of(&user).unwrap();
        assert_eq!(profile.experience, 250);
        assert_eq!(
            fixture.publisher.event_types(),
            vec!["enrollment.completed.v1".to_string()]
        );
    }

    #[tokio::test]
    async fn unknown_enrollment_is_not_found() {
        let fixture = fixture();
        let err = fixture
            .handler
            .handle(UpdateProgressCommand {
                enrollment_id: EnrollmentId::new(),
                user_id: UserId::new(),
                progress: 10,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, EnrollmentError::NotFound(_)));
    }
}
