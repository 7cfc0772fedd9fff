//! CloseScholarshipHandler - admin closes or reopens a program.

use std::sync::Arc;

use crate::domain::foundation::{Role, ScholarshipId, UserId};
use crate::domain::scholarship::{Scholarship, ScholarshipError};
use crate::ports::ScholarshipRepository;

/// Command to close or reopen a scholarship program.
#[derive(Debug, Clone)]
pub struct CloseScholarshipCommand {
    pub scholarship_id: ScholarshipId,
    pub user_id: UserId,
    pub role: Role,
    /// True closes the program; false reopens it.
    pub close: bool,
}

/// Handler for closing and reopening programs. Admin only.
pub struct CloseScholarshipHandler {
    scholarships: Arc<dyn ScholarshipRepository>,
}

impl CloseScholarshipHandler {
    pub fn new(scholarships: Arc<dyn ScholarshipRepository>) -> Self {
        Self { scholarships }
    }

    pub async fn handle(&self, cmd: CloseScholarshipCommand) -> Result<Scholarship, ScholarshipError> {
        cmd.role.require_admin()?;

        let mut scholarship = self
            .scholarships
            .find_by_id(&cmd.scholarship_id)
            .await?
            .ok_or_else(|| ScholarshipError::not_found(cmd.scholarship_id))?;

        let result = if cmd.close {
            scholarship.close()
        } else {
            scholarship.reopen()
        };
        result.map_err(|e| {
            ScholarshipError::invalid_state(format!("{:?}", scholarship.status), e.to_string())
        })?;

        self.scholarships.update(&scholarship).await?;
        Ok(scholarship)
    }
}
