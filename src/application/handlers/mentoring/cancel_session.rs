//! CancelSessionHandler - either participant cancels before completion.

use std::sync::Arc;

use crate::domain::foundation::{MentoringSessionId, Role, UserId};
use crate::domain::mentoring::{MentoringError, MentoringSession};
use crate::ports::MentoringSessionRepository;

/// Command to cancel a session.
#[derive(Debug, Clone)]
pub struct CancelSessionCommand {
    pub session_id: MentoringSessionId,
    pub user_id: UserId,
    pub role: Role,
}

/// Handler for session cancellation. Participants (or admin) only.
pub struct CancelSessionHandler {
    sessions: Arc<dyn MentoringSessionRepository>,
}

impl CancelSessionHandler {
    pub fn new(sessions: Arc<dyn MentoringSessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, cmd: CancelSessionCommand) -> Result<MentoringSession, MentoringError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| MentoringError::not_found(cmd.session_id))?;

        session.check_participant(&cmd.user_id, cmd.role)?;
        session
            .cancel()
            .map_err(|e| MentoringError::invalid_state(format!("{:?}", session.status), e.to_string()))?;
        self.sessions.update(&session).await?;
        Ok(session)
    }
}
