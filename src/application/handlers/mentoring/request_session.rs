//! RequestSessionHandler - command handler for booking a mentoring session.

use std::sync::Arc;

use crate::domain::foundation::{CourseId, MentoringSessionId, Timestamp, UserId};
use crate::domain::mentoring::{MentoringError, MentoringSession};
use crate::ports::MentoringSessionRepository;

/// Command to request a mentoring session.
#[derive(Debug, Clone)]
pub struct RequestSessionCommand {
    pub student_id: UserId,
    pub mentor_id: UserId,
    pub course_id: Option<CourseId>,
    pub topic: String,
    pub scheduled_at: Timestamp,
    pub duration_minutes: u16,
}

/// Handler for session requests.
pub struct RequestSessionHandler {
    sessions: Arc<dyn MentoringSessionRepository>,
}

impl RequestSessionHandler {
    pub fn new(sessions: Arc<dyn MentoringSessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, cmd: RequestSessionCommand) -> Result<MentoringSession, MentoringError> {
        if !cmd.scheduled_at.is_after(&Timestamp::now()) {
            return Err(MentoringError::validation(
                "scheduled_at",
                "Sessions must be scheduled in the future",
            ));
        }

        let session = MentoringSession::request(
            MentoringSessionId::new(),
            cmd.mentor_id,
            cmd.student_id,
            cmd.course_id,
            cmd.topic,
            cmd.scheduled_at,
            cmd.duration_minutes,
        )?;
        self.sessions.save(&session).await?;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMentoringSessions;

    #[tokio::test]
    async fn request_in_the_past_is_rejected() {
        let handler = RequestSessionHandler::new(Arc::new(InMemoryMentoringSessions::new()));
        let err = handler
            .handle(RequestSessionCommand {
                student_id: UserId::new(),
                mentor_id: UserId::new(),
                course_id: None,
                topic: "Lifetimes".to_string(),
                scheduled_at: Timestamp::now().add_days(-1),
                duration_minutes: 60,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MentoringError::ValidationFailed { .. }));
    }

    #[tokio::test]
    async fn valid_request_is_saved() {
        let sessions = Arc::new(InMemoryMentoringSessions::new());
        let handler = RequestSessionHandler::new(sessions.clone());

        let session = handler
            .handle(RequestSessionCommand {
                student_id: UserId::new(),
                mentor_id: UserId::new(),
                course_id: None,
                topic: "Lifetimes".to_string(),
                scheduled_at: Timestamp::now().add_days(2),
                duration_minutes: 60,
            })
            .await
            .unwrap();

        assert!(sessions.find_by_id(&session.id).await.unwrap().is_some());
    }
}
