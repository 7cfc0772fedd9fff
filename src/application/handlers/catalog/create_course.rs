//! CreateCourseHandler - command handler for authoring a course.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Course, CourseLevel};
use crate::domain::foundation::{CourseId, Role, UserId};
use crate::ports::CourseRepository;

/// Command to create a draft course.
#[derive(Debug, Clone)]
pub struct CreateCourseCommand {
    pub mentor_id: UserId,
    pub role: Role,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub price: i64,
    pub level: CourseLevel,
}

/// Handler for course creation. Mentors and admins only.
pub struct CreateCourseHandler {
    courses: Arc<dyn CourseRepository>,
}

impl CreateCourseHandler {
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }

    pub async fn handle(&self, cmd: CreateCourseCommand) -> Result<Course, CatalogError> {
        cmd.role.require_mentor()?;

        if self.courses.find_by_slug(&cmd.slug).await?.is_some() {
            return Err(CatalogError::slug_taken(cmd.slug));
        }

        let course = Course::create(
            CourseId::new(),
            cmd.mentor_id,
            cmd.title,
            cmd.slug,
            cmd.description,
            cmd.price,
            cmd.level,
        )?;
        self.courses.save(&course).await?;
        Ok(course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCourses;

    fn command(role: Role, slug: &str) -> CreateCourseCommand {
        CreateCourseCommand {
            mentor_id: UserId::new(),
            role,
            title: "Ownership and Borrowing".to_string(),
            slug: slug.to_string(),
            description: String::new(),
            price: 150_000,
            level: CourseLevel::Beginner,
        }
    }

    #[tokio::test]
    async fn mentor_creates_draft_course() {
        let handler = CreateCourseHandler::new(Arc::new(InMemoryCourses::new()));
        let course = handler.handle(command(Role::Mentor, "ownership")).await.unwrap();
        assert_eq!(course.slug, "ownership");
    }

    #[tokio::test]
    async fn student_is_forbidden() {
        let handler = CreateCourseHandler::new(Arc::new(InMemoryCourses::new()));
        let err = handler.handle(command(Role::Student, "ownership")).await.unwrap_err();
        assert!(matches!(err, CatalogError::Forbidden(_)));
    }

    #[tokio::test]
    async fn duplicate_slug_is_rejected() {
        let handler = CreateCourseHandler::new(Arc::new(InMemoryCourses::new()));
        handler.handle(command(Role::Mentor, "ownership")).await.unwrap();

        let err = handler.handle(command(Role::Mentor, "ownership")).await.unwrap_err();
        assert!(matches!(err, CatalogError::SlugTaken(_)));
    }
}
