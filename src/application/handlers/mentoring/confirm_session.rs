//! ConfirmSessionHandler - mentor confirms a requested session.

use std::sync::Arc;

use crate::domain::foundation::{MentoringSessionId, Role, UserId};
use crate::domain::mentoring::{MentoringError, MentoringSession};
use crate::ports::MentoringSessionRepository;

/// Command to confirm a session.
#[derive(Debug, Clone)]
pub struct ConfirmSessionCommand {
    pub session_id: MentoringSessionId,
    pub user_id: UserId,
    pub role: Role,
}

/// Handler for session confirmation. Mentor (or admin) only.
pub struct ConfirmSessionHandler {
    sessions: Arc<dyn MentoringSessionRepository>,
}

impl ConfirmSessionHandler {
    pub fn new(sessions: Arc<dyn MentoringSessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, cmd: ConfirmSessionCommand) -> Result<MentoringSession, MentoringError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| MentoringError::not_found(cmd.session_id))?;

        session.check_mentor(&cmd.user_id, cmd.role)?;
        session
            .confirm()
            .map_err(|e| MentoringError::invalid_state(format!("{:?}", session.status), e.to_string()))?;
        self.sessions.update(&session).await?;
        Ok(session)
    }
}
