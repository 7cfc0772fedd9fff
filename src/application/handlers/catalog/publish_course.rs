//! PublishCourseHandler - command handler for publishing a course.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Course};
use crate::domain::foundation::{CourseId, OwnedByUser, Role, UserId};
use crate::ports::CourseRepository;

/// Command to publish a course into the catalog.
#[derive(Debug, Clone)]
pub struct PublishCourseCommand {
    pub course_id: CourseId,
    pub user_id: UserId,
    pub role: Role,
}

/// Handler for course publication. Owning mentor or admin only.
pub struct PublishCourseHandler {
    courses: Arc<dyn CourseRepository>,
}

impl PublishCourseHandler {
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }

    pub async fn handle(&self, cmd: PublishCourseCommand) -> Result<Course, CatalogError> {
        let mut course = self
            .courses
            .find_by_id(&cmd.course_id)
            .await?
            .ok_or_else(|| CatalogError::not_found(cmd.course_id))?;

        course.check_ownership_or_admin(&cmd.user_id, cmd.role)?;
        course
            .publish()
            .map_err(|e| CatalogError::invalid_state(format!("{:?}", course.status), e.to_string()))?;
        self.courses.update(&course).await?;

        tracing::info!(course_id = %course.id, slug = %course.slug, "course published");
        Ok(course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCourses;
    use crate::domain::catalog::{CourseLevel, CourseStatus};

    #[tokio::test]
    async fn owner_publishes_draft() {
        let courses = Arc::new(InMemoryCourses::new());
        let mentor = UserId::new();
        let course = Course::create(
            CourseId::new(),
            mentor,
            "T",
            "t",
            "",
            0,
            CourseLevel::Beginner,
        )
        .unwrap();
        courses.save(&course).await.unwrap();

        let handler = PublishCourseHandler::new(courses);
        let published = handler
            .handle(PublishCourseCommand {
                course_id: course.id,
                user_id: mentor,
                role: Role::Mentor,
            })
            .await
            .unwrap();

        assert_eq!(published.status, CourseStatus::Published);
    }

    #[tokio::test]
    async fn publishing_twice_is_invalid_state() {
        let courses = Arc::new(InMemoryCourses::new());
        let mentor = UserId::new();
        let mut course = Course::create(
            CourseId::new(),
            mentor,
            "T",
            "t",
            "",
            0,
            CourseLevel::Beginner,
        )
        .unwrap();
        course.publish().unwrap();
        courses.save(&course).await.unwrap();

        let handler = PublishCourseHandler::new(courses);
        let err = handler
            .handle(PublishCourseCommand {
                course_id: course.id,
                user_id: mentor,
                role: Role::Mentor,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::InvalidState { .. }));
    }
}
