//! ApplyScholarshipHandler - student applies to an open program.

use std::sync::Arc;

use crate::domain::foundation::{ApplicationId, ErrorCode, ScholarshipId, Timestamp, UserId};
use crate::domain::scholarship::{ScholarshipApplication, ScholarshipError};
use crate::ports::ScholarshipRepository;

/// Command to apply to a scholarship.
#[derive(Debug, Clone)]
pub struct ApplyScholarshipCommand {
    pub scholarship_id: ScholarshipId,
    pub user_id: UserId,
    pub essay: String,
}

/// Handler for scholarship applications.
pub struct ApplyScholarshipHandler {
    scholarships: Arc<dyn ScholarshipRepository>,
}

impl ApplyScholarshipHandler {
    pub fn new(scholarships: Arc<dyn ScholarshipRepository>) -> Self {
        Self { scholarships }
    }

    pub async fn handle(
        &self,
        cmd: ApplyScholarshipCommand,
    ) -> Result<ScholarshipApplication, ScholarshipError> {
        let scholarship = self
            .scholarships
            .find_by_id(&cmd.scholarship_id)
            .await?
            .ok_or_else(|| ScholarshipError::not_found(cmd.scholarship_id))?;

        scholarship.check_accepting(Timestamp::now()).map_err(|e| match e.code {
            ErrorCode::QuotaExhausted => ScholarshipError::quota_exhausted(cmd.scholarship_id),
            _ => ScholarshipError::closed(cmd.scholarship_id),
        })?;

        if self
            .scholarships
            .find_application_by_user(&cmd.scholarship_id, &cmd.user_id)
            .await?
            .is_some()
        {
            return Err(ScholarshipError::already_applied(cmd.scholarship_id));
        }

        let application = ScholarshipApplication::submit(
            ApplicationId::new(),
            cmd.scholarship_id,
            cmd.user_id,
            cmd.essay,
        )?;
        self.scholarships.save_application(&application).await?;
        Ok(application)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryScholarships;
    use crate::domain::foundation::CourseId;
    use crate::domain::scholarship::Scholarship;

    async fn seed_open(repo: &InMemoryScholarships) -> Scholarship {
        let scholarship = Scholarship::create(
            ScholarshipId::new(),
            "Grant",
            "",
            CourseId::new(),
            1,
            Timestamp::now().add_days(-1),
            Timestamp::now().add_days(7),
        )
        .unwrap();
        repo.save(&scholarship).await.unwrap();
        scholarship
    }

    #[tokio::test]
    async fn student_applies_once() {
        let repo = Arc::new(InMemoryScholarships::new());
        let scholarship = seed_open(&repo).await;
        let handler = ApplyScholarshipHandler::new(repo);
        let user = UserId::new();

        let cmd = ApplyScholarshipCommand {
            scholarship_id: scholarship.id,
            user_id: user,
            essay: "I want this seat.".to_string(),
        };

        assert!(handler.handle(cmd.clone()).await.is_ok());
        let err = handler.handle(cmd).await.unwrap_err();
        assert!(matches!(err, ScholarshipError::AlreadyApplied(_)));
    }

    #[tokio::test]
    async fn closed_program_rejects_applications() {
        let repo = Arc::new(InMemoryScholarships::new());
        let mut scholarship = seed_open(&repo).await;
        scholarship.close().unwrap();
        repo.update(&scholarship).await.unwrap();

        let handler = ApplyScholarshipHandler::new(repo);
        let err = handler
            .handle(ApplyScholarshipCommand {
                scholarship_id: scholarship.id,
                user_id: UserId::new(),
                essay: "essay".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ScholarshipError::Closed(_)));
    }
}
