//! Scholarship repository port (programs and applications).

use async_trait::async_trait;

use crate::domain::foundation::{ApplicationId, DomainError, ScholarshipId, UserId};
use crate::domain::scholarship::{Scholarship, ScholarshipApplication};

/// Repository port for Scholarship programs and their applications.
///
/// Implementations must enforce one application per (scholarship, user)
/// (mapped to `AlreadyApplied`).
#[async_trait]
pub trait ScholarshipRepository: Send + Sync {
    /// Save a new scholarship program.
    async fn save(&self, scholarship: &Scholarship) -> Result<(), DomainError>;

    /// Update an existing program.
    async fn update(&self, scholarship: &Scholarship) -> Result<(), DomainError>;

    /// Find a program by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &ScholarshipId) -> Result<Option<Scholarship>, DomainError>;

    /// List open programs, closing soonest first.
    async fn list_open(&self) -> Result<Vec<Scholarship>, DomainError>;

    /// Save a new application.
    async fn save_application(
        &self,
        application: &ScholarshipApplication,
    ) -> Result<(), DomainError>;

    /// Update an existing application.
    async fn update_application(
        &self,
        application: &ScholarshipApplication,
    ) -> Result<(), DomainError>;

    /// Find an application by its ID. Returns `None` if not found.
    async fn find_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<ScholarshipApplication>, DomainError>;

    /// Find a user's application to a program. Returns `None` if none.
    async fn find_application_by_user(
        &self,
        scholarship_id: &ScholarshipId,
        user_id: &UserId,
    ) -> Result<Option<ScholarshipApplication>, DomainError>;

    /// List applications to a program, oldest first.
    async fn list_applications(
        &self,
        scholarship_id: &ScholarshipId,
    ) -> Result<Vec<ScholarshipApplication>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scholarship_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ScholarshipRepository) {}
    }
}
