//! CreateScholarshipHandler - admin opens a scholarship program.

use std::sync::Arc;

use crate::domain::foundation::{CourseId, Role, ScholarshipId, Timestamp};
use crate::domain::scholarship::{Scholarship, ScholarshipError};
use crate::ports::{CourseRepository, ScholarshipRepository};

/// Command to open a scholarship program.
#[derive(Debug, Clone)]
pub struct CreateScholarshipCommand {
    pub role: Role,
    pub name: String,
    pub description: String,
    pub course_id: CourseId,
    pub quota: u32,
    pub opens_at: Timestamp,
    pub closes_at: Timestamp,
}

/// Handler for scholarship creation. Admin only.
pub struct CreateScholarshipHandler {
    scholarships: Arc<dyn ScholarshipRepository>,
    courses: Arc<dyn CourseRepository>,
}

impl CreateScholarshipHandler {
    pub fn new(
        scholarships: Arc<dyn ScholarshipRepository>,
        courses: Arc<dyn CourseRepository>,
    ) -> Self {
        Self {
            scholarships,
            courses,
        }
    }

    pub async fn handle(&self, cmd: CreateScholarshipCommand) -> Result<Scholarship, ScholarshipError> {
        cmd.role.require_admin()?;

        let course = self
            .courses
            .find_by_id(&cmd.course_id)
            .await
            .map_err(|e| ScholarshipError::infrastructure(e.to_string()))?
            .ok_or_else(|| {
                ScholarshipError::validation("course_id", "Course does not exist")
            })?;
        if !course.is_purchasable() {
            return Err(ScholarshipError::validation(
                "course_id",
                "Scholarships require a published course",
            ));
        }

        let scholarship = Scholarship::create(
            ScholarshipId::new(),
            cmd.name,
            cmd.description,
            cmd.course_id,
            cmd.quota,
            cmd.opens_at,
            cmd.closes_at,
        )?;
        self.scholarships.save(&scholarship).await?;
        Ok(scholarship)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryCourses, InMemoryScholarships};
    use crate::domain::catalog::{Course, CourseLevel};
    use crate::domain::foundation::UserId;

    #[tokio::test]
    async fn admin_creates_program_for_published_course() {
        let courses = Arc::new(InMemoryCourses::new());
        let mut course = Course::create(
            CourseId::new(),
            UserId::new(),
            "T",
            "t",
            "",
            100_000,
            CourseLevel::Beginner,
        )
        .unwrap();
        course.publish().unwrap();
        courses.save(&course).await.unwrap();

        let handler =
            CreateScholarshipHandler::new(Arc::new(InMemoryScholarships::new()), courses);
        let result = handler
            .handle(CreateScholarshipCommand {
                role: Role::Admin,
                name: "Grant".to_string(),
                description: String::new(),
                course_id: course.id,
                quota: 5,
                opens_at: Timestamp::now(),
                closes_at: Timestamp::now().add_days(30),
            })
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn non_admin_is_forbidden() {
        let handler = CreateScholarshipHandler::new(
            Arc::new(InMemoryScholarships::new()),
            Arc::new(InMemoryCourses::new()),
        );
        let err = handler
            .handle(CreateScholarshipCommand {
                role: Role::Mentor,
                name: "Grant".to_string(),
                description: String::new(),
                course_id: CourseId::new(),
                quota: 5,
                opens_at: Timestamp::now(),
                closes_at: Timestamp::now().add_days(30),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ScholarshipError::Forbidden(_)));
    }
}
