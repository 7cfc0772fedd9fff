//! ArchiveCourseHandler - command handler for archiving a course.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Course};
use crate::domain::foundation::{CourseId, OwnedByUser, Role, UserId};
use crate::ports::CourseRepository;

/// Command to archive a course from the catalog.
#[derive(Debug, Clone)]
pub struct ArchiveCourseCommand {
    pub course_id: CourseId,
    pub user_id: UserId,
    pub role: Role,
}

/// Handler for course archival. Owning mentor or admin only.
pub struct ArchiveCourseHandler {
    courses: Arc<dyn CourseRepository>,
}

impl ArchiveCourseHandler {
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }

    pub async fn handle(&self, cmd: ArchiveCourseCommand) -> Result<Course, CatalogError> {
        let mut course = self
            .courses
            .find_by_id(&cmd.course_id)
            .await?
            .ok_or_else(|| CatalogError::not_found(cmd.course_id))?;

        course.check_ownership_or_admin(&cmd.user_id, cmd.role)?;
        course
            .archive()
            .map_err(|e| CatalogError::invalid_state(format!("{:?}", course.status), e.to_string()))?;
        self.courses.update(&course).await?;
        Ok(course)
    }
}
