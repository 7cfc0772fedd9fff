//! DecideApplicationHandler - admin approves or rejects an application.
//!
//! Approval counts against the program quota, grants the enrollment
//! entitlement and awards the scholarship achievement.

use std::sync::Arc;

use crate::domain::foundation::{ApplicationId, Role, UserId};
use crate::domain::scholarship::{ScholarshipApplication, ScholarshipError};
use crate::domain::user::{AchievementKind, ExperienceSource};
use crate::ports::ScholarshipRepository;

use super::super::enrollment::{GrantEnrollmentCommand, GrantEnrollmentHandler};
use super::super::user::ProgressionService;

/// The decision being made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

/// Command to decide an application.
#[derive(Debug, Clone)]
pub struct DecideApplicationCommand {
    pub application_id: ApplicationId,
    pub decided_by: UserId,
    pub role: Role,
    pub decision: Decision,
}

/// Handler for application decisions. Admin only.
pub struct DecideApplicationHandler {
    scholarships: Arc<dyn ScholarshipRepository>,
    grant_enrollment: Arc<GrantEnrollmentHandler>,
    progression: Arc<ProgressionService>,
}

impl DecideApplicationHandler {
    pub fn new(
        scholarships: Arc<dyn ScholarshipRepository>,
        grant_enrollment: Arc<GrantEnrollmentHandler>,
        progression: Arc<ProgressionService>,
    ) -> Self {
        Self {
            scholarships,
            grant_enrollment,
            progression,
        }
    }

    pub async fn handle(
        &self,
        cmd: DecideApplicationCommand,
    ) -> Result<ScholarshipApplication, ScholarshipError> {
        cmd.role.require_admin()?;

        let mut application = self
            .scholarships
            .find_application(&cmd.application_id)
            .await?
            .ok_or_else(|| ScholarshipError::application_not_found(cmd.application_id))?;

        let mut scholarship = self
            .scholarships
            .find_by_id(&application.scholarship_id)
            .await?
            .ok_or_else(|| ScholarshipError::not_found(application.scholarship_id))?;

        match cmd.decision {
            Decision::Reject => {
                application.reject(cmd.decided_by).map_err(|e| {
                    ScholarshipError::invalid_state(
                        format!("{:?}", application.status),
                        e.to_string(),
                    )
                })?;
                self.scholarships.update_application(&application).await?;
            }
            Decision::Approve => {
                scholarship
                    .record_award()
                    .map_err(|_| ScholarshipError::quota_exhausted(scholarship.id))?;
                application.approve(cmd.decided_by).map_err(|e| {
                    ScholarshipError::invalid_state(
                        format!("{:?}", application.status),
                        e.to_string(),
                    )
                })?;

                self.scholarships.update(&scholarship).await?;
                self.scholarships.update_application(&application).await?;

                self.grant_enrollment
                    .handle(GrantEnrollmentCommand {
                        user_id: application.user_id,
                        course_id: scholarship.course_id,
                    })
                    .await
                    .map_err(|e| ScholarshipError::infrastructure(e.to_string()))?;

                self.progression
                    .award(&application.user_id, AchievementKind::ScholarshipAwarded)
                    .await
                    .map_err(|e| ScholarshipError::infrastructure(e.to_string()))?;
                self.progression
                    .grant_experience(&application.user_id, ExperienceSource::ScholarshipAward)
                    .await
                    .map_err(|e| ScholarshipError::infrastructure(e.to_string()))?;

                tracing::info!(
                    application_id = %application.id,
                    scholarship_id = %scholarship.id,
                    user_id = %application.user_id,
                    "scholarship awarded"
                );
            }
        }

        Ok(application)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{
        InMemoryEnrollments, InMemoryProfiles, InMemoryScholarships,
    };
    use crate::domain::foundation::{CourseId, ScholarshipId, Timestamp};
    use crate::domain::scholarship::{ApplicationStatus, Scholarship};
    use crate::ports::EnrollmentRepository;
    use crate::ports::ProfileRepository;

    struct Fixture {
        handler: DecideApplicationHandler,
        scholarships: Arc<InMemoryScholarships>,
        enrollments: Arc<InMemoryEnrollments>,
        profiles: Arc<InMemoryProfiles>,
    }

    fn fixture() -> Fixture {
        let scholarships = Arc::new(InMemoryScholarships::new());
        let enrollments = Arc::new(InMemoryEnrollments::new());
        let profiles = Arc::new(InMemoryProfiles::new());
        let progression = Arc::new(ProgressionService::new(profiles.clone()));
        let grant = Arc::new(GrantEnrollmentHandler::new(
            enrollments.clone(),
            progression.clone(),
            Arc::new(InMemoryEventBus::new()),
        ));
        Fixture {
            handler: DecideApplicationHandler::new(scholarships.clone(), grant, progression),
            scholarships,
            enrollments,
            profiles,
        }
    }

    async fn seed(fixture: &Fixture, quota: u32) -> (Scholarship, ScholarshipApplication) {
        let scholarship = Scholarship::create(
            ScholarshipId::new(),
            "Grant",
            "",
            CourseId::new(),
            quota,
            Timestamp::now().add_days(-1),
            Timestamp::now().add_days(7),
        )
        .unwrap();
        fixture.scholarships.save(&scholarship).await.unwrap();

        let application = ScholarshipApplication::submit(
            ApplicationId::new(),
            scholarship.id,
            UserId::new(),
            "essay",
        )
        .unwrap();
        fixture
            .scholarships
            .save_application(&application)
            .await
            .unwrap();
        (scholarship, application)
    }

    #[tokio::test]
    async fn approval_enrolls_and_awards() {
        let fixture = fixture();
        let (scholarship, application) = seed(&fixture, 1).await;

        let decided = fixture
            .handler
            .handle(DecideApplicationCommand {
                application_id: application.id,
                decided_by: UserId::new(),
                role: Role::Admin,
                decision: Decision::Approve,
            })
            .await
            .unwrap();

        assert_eq!(decided.status, ApplicationStatus::Approved);
        assert!(fixture
            .enrollments
            .find_by_user_and_course(&application.user_id, &scholarship.course_id)
            .await
            .unwrap()
            .is_some());
        assert!(fixture
            .profiles
            .has_achievement(&application.user_id, AchievementKind::ScholarshipAwarded)
            .await
            .unwrap());

        let updated = fixture
            .scholarships
            .find_by_id(&scholarship.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.awarded, 1);
    }

    #[tokio::test]
    async fn approval_past_quota_fails() {
        let fixture = fixture();
        let (scholarship, application) = seed(&fixture, 1).await;

        // Exhaust the quota out of band.
        let mut full = fixture
            .scholarships
            .find_by_id(&scholarship.id)
            .await
            .unwrap()
            .unwrap();
        full.record_award().unwrap();
        fixture.scholarships.update(&full).await.unwrap();

        let err = fixture
            .handler
            .handle(DecideApplicationCommand {
                application_id: application.id,
                decided_by: UserId::new(),
                role: Role::Admin,
                decision: Decision::Approve,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ScholarshipError::QuotaExhausted(_)));
    }

    #[tokio::test]
    async fn rejection_only_updates_the_application() {
        let fixture = fixture();
        let (scholarship, application) = seed(&fixture, 1).await;

        let decided = fixture
            .handler
            .handle(DecideApplicationCommand {
                application_id: application.id,
                decided_by: UserId::new(),
                role: Role::Admin,
                decision: Decision::Reject,
            })
            .await
            .unwrap();

        assert_eq!(decided.status, ApplicationStatus::Rejected);
        assert!(fixture
            .enrollments
            .find_by_user_and_course(&application.user_id, &scholarship.course_id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn non_admin_cannot_decide() {
        let fixture = fixture();
        let (_, application) = seed(&fixture, 1).await;

        let err = fixture
            .handler
            .handle(DecideApplicationCommand {
                application_id: application.id,
                decided_by: UserId::new(),
                role: Role::Mentor,
                decision: Decision::Approve,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ScholarshipError::Forbidden(_)));
    }
}
