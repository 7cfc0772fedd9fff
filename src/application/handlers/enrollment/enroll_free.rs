//! EnrollFreeHandler - direct enrollment into free courses.
//!
//! Paid courses go through billing checkout; this handler only accepts
//! published courses priced at zero.

use std::sync::Arc;

use crate::domain::enrollment::{Enrollment, EnrollmentError};
use crate::domain::foundation::{CourseId, UserId};
use crate::ports::CourseRepository;

use super::{GrantEnrollmentCommand, GrantEnrollmentHandler};

/// Command to enroll into a free course.
#[derive(Debug, Clone)]
pub struct EnrollFreeCommand {
    pub user_id: UserId,
    pub course_id: CourseId,
}

/// Handler for free-course enrollment.
pub struct EnrollFreeHandler {
    courses: Arc<dyn CourseRepository>,
    grant: Arc<GrantEnrollmentHandler>,
}

impl EnrollFreeHandler {
    pub fn new(courses: Arc<dyn CourseRepository>, grant: Arc<GrantEnrollmentHandler>) -> Self {
        Self { courses, grant }
    }

    pub async fn handle(&self, cmd: EnrollFreeCommand) -> Result<Enrollment, EnrollmentError> {
        let course = self
            .courses
            .find_by_id(&cmd.course_id)
            .await?
            .ok_or_else(|| EnrollmentError::course_not_available(cmd.course_id))?;

        if !course.is_purchasable() {
            return Err(EnrollmentError::course_not_available(cmd.course_id));
        }
        if !course.is_free() {
            return Err(EnrollmentError::payment_required(cmd.course_id));
        }

        let result = self
            .grant
            .handle(GrantEnrollmentCommand {
                user_id: cmd.user_id,
                course_id: cmd.course_id,
            })
            .await?;

        if !result.newly_created {
            return Err(EnrollmentError::already_enrolled(cmd.user_id, cmd.course_id));
        }
        Ok(result.enrollment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{InMemoryCourses, InMemoryEnrollments, InMemoryProfiles};
    use crate::application::handlers::user::ProgressionService;
    use crate::domain::catalog::{Course, CourseLevel};
    use crate::domain::foundation::ErrorCode;

    struct Fixture {
        handler: EnrollFreeHandler,
        courses: Arc<InMemoryCourses>,
    }

    fn fixture() -> Fixture {
        let courses = Arc::new(InMemoryCourses::new());
        let enrollments = Arc::new(InMemoryEnrollments::new());
        let profiles = Arc::new(InMemoryProfiles::new());
        let progression = Arc::new(ProgressionService::new(profiles));
        let grant = Arc::new(GrantEnrollmentHandler::new(
            enrollments,
            progression,
            Arc::new(InMemoryEventBus::new()),
        ));
        Fixture {
            handler: EnrollFreeHandler::new(courses.clone(), grant),
            courses,
        }
    }

    async fn seed_course(fixture: &Fixture, price: i64, published: bool) -> Course {
        let mut course = Course::create(
            CourseId::new(),
            UserId::new(),
            "Rust Basics",
            "rust-basics",
            "",
            price,
            CourseLevel::Beginner,
        )
        .unwrap();
        if published {
            course.publish().unwrap();
        }
        fixture.courses.save(&course).await.unwrap();
        course
    }

    #[tokio::test]
    async fn enrolls_into_published_free_course() {
        let fixture = fixture();
        let course = seed_course(&fixture, 0, true).await;

        let enrollment = fixture
            .handler
            .handle(EnrollFreeCommand {
                user_id: UserId::new(),
                course_id: course.id,
            })
            .await
            .unwrap();

        assert_eq!(enrollment.course_id, course.id);
    }

    #[tokio::test]
    async fn rejects_paid_course() {
        let fixture = fixture();
        let course = seed_course(&fixture, 150_000, true).await;

        let err = fixture
            .handler
            .handle(EnrollFreeCommand {
                user_id: UserId::new(),
                course_id: course.id,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, EnrollmentError::PaymentRequired(_)));
    }

    #[tokio::test]
    async fn rejects_unpublished_course() {
        let fixture = fixture();
        let course = seed_course(&fixture, 0, false).await;

        let err = fixture
            .handler
            .handle(EnrollFreeCommand {
                user_id: UserId::new(),
                course_id: course.id,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, EnrollmentError::CourseNotAvailable(_)));
    }

    #[tokio::test]
    async fn rejects_double_enrollment() {
        let fixture = fixture();
        let course = seed_course(&fixture, 0, true).await;
        let user = UserId::new();

        fixture
            .handler
            .handle(EnrollFreeCommand {
                user_id: user,
                course_id: course.id,
            })
            .await
            .unwrap();

        let err = fixture
            .handler
            .handle(EnrollFreeCommand {
                user_id: user,
                course_id: course.id,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::AlreadyEnrolled);
    }
}
