//! Enrollment repository port.

use async_trait::async_trait;

use crate::domain::enrollment::Enrollment;
use crate::domain::foundation::{CourseId, DomainError, EnrollmentId, Timestamp, UserId};

/// Repository port for Enrollment aggregate persistence.
///
/// Implementations must enforce the (user_id, course_id) unique constraint
/// (mapped to `AlreadyEnrolled`).
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Save a new enrollment.
    async fn save(&self, enrollment: &Enrollment) -> Result<(), DomainError>;

    /// Update an existing enrollment.
    async fn update(&self, enrollment: &Enrollment) -> Result<(), DomainError>;

    /// Find an enrollment by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &EnrollmentId) -> Result<Option<Enrollment>, DomainError>;

    /// Find a user's enrollment in a course. Returns `None` if not enrolled.
    async fn find_by_user_and_course(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<Enrollment>, DomainError>;

    /// List all enrollments for a user, newest first.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Enrollment>, DomainError>;

    /// Count completed enrollments for a user (achievement thresholds).
    async fn count_completed_by_user(&self, user_id: &UserId) -> Result<u64, DomainError>;

    /// List active enrollments whose next report is due on or before `due_by`.
    ///
    /// Used by the maintenance pass to queue report reminders.
    async fn list_report_due(&self, due_by: Timestamp) -> Result<Vec<Enrollment>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enrollment_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn EnrollmentRepository) {}
    }
}
