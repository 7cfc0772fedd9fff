//! Course repository port.

use async_trait::async_trait;

use crate::domain::catalog::Course;
use crate::domain::foundation::{CourseId, DomainError, UserId};

/// Repository port for Course aggregate persistence.
///
/// Implementations must enforce slug uniqueness (mapped to `SlugTaken`).
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Save a new course.
    async fn save(&self, course: &Course) -> Result<(), DomainError>;

    /// Update an existing course.
    async fn update(&self, course: &Course) -> Result<(), DomainError>;

    /// Find a course by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError>;

    /// Find a course by its slug. Returns `None` if not found.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Course>, DomainError>;

    /// List published courses, newest first.
    async fn list_published(&self) -> Result<Vec<Course>, DomainError>;

    /// List all courses authored by a mentor.
    async fn list_by_mentor(&self, mentor_id: &UserId) -> Result<Vec<Course>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn CourseRepository) {}
    }
}
