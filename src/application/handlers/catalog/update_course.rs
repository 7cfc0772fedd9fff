//! UpdateCourseHandler - command handler for editing course metadata.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Course, CourseLevel};
use crate::domain::foundation::{CourseId, OwnedByUser, Role, UserId};
use crate::ports::CourseRepository;

/// Command to update course metadata.
#[derive(Debug, Clone)]
pub struct UpdateCourseCommand {
    pub course_id: CourseId,
    pub user_id: UserId,
    pub role: Role,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub level: CourseLevel,
}

/// Handler for course metadata updates. Owning mentor or admin only.
pub struct UpdateCourseHandler {
    courses: Arc<dyn CourseRepository>,
}

impl UpdateCourseHandler {
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }

    pub async fn handle(&self, cmd: UpdateCourseCommand) -> Result<Course, CatalogError> {
        let mut course = self
            .courses
            .find_by_id(&cmd.course_id)
            .await?
            .ok_or_else(|| CatalogError::not_found(cmd.course_id))?;

        course.check_ownership_or_admin(&cmd.user_id, cmd.role)?;
        course.update_details(cmd.title, cmd.description, cmd.price, cmd.level)?;
        self.courses.update(&course).await?;
        Ok(course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCourses;

    #[tokio::test]
    async fn only_owner_or_admin_updates() {
        let courses = Arc::new(InMemoryCourses::new());
        let mentor = UserId::new();
        let course = Course::create(
            CourseId::new(),
            mentor,
            "Old",
            "old",
            "",
            0,
            CourseLevel::Beginner,
        )
        .unwrap();
        courses.save(&course).await.unwrap();
        let handler = UpdateCourseHandler::new(courses);

        let cmd = |user_id, role| UpdateCourseCommand {
            course_id: course.id,
            user_id,
            role,
            title: "New".to_string(),
            description: String::new(),
            price: 100,
            level: CourseLevel::Advanced,
        };

        assert!(handler.handle(cmd(UserId::new(), Role::Mentor)).await.is_err());
        assert!(handler.handle(cmd(UserId::new(), Role::Admin)).await.is_ok());
        let updated = handler.handle(cmd(mentor, Role::Mentor)).await.unwrap();
        assert_eq!(updated.title, "New");
    }
}
