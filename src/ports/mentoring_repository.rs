//! Mentoring session repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MentoringSessionId, UserId};
use crate::domain::mentoring::MentoringSession;

/// Repository port for MentoringSession aggregate persistence.
#[async_trait]
pub trait MentoringSessionRepository: Send + Sync {
    /// Save a new session.
    async fn save(&self, session: &MentoringSession) -> Result<(), DomainError>;

    /// Update an existing session.
    async fn update(&self, session: &MentoringSession) -> Result<(), DomainError>;

    /// Find a session by its ID. Returns `None` if not found.
    async fn find_by_id(
        &self,
        id: &MentoringSessionId,
    ) -> Result<Option<MentoringSession>, DomainError>;

    /// List sessions where the user participates as mentor or student,
    /// soonest first.
    async fn list_for_participant(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<MentoringSession>, DomainError>;

    /// Count completed sessions for a student (achievement thresholds).
    async fn count_completed_for_student(&self, user_id: &UserId) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentoring_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn MentoringSessionRepository) {}
    }
}
