//! CompleteSessionHandler - mentor closes out a confirmed session.

use std::sync::Arc;

use crate::domain::foundation::{MentoringSessionId, Role, UserId};
use crate::domain::mentoring::{MentoringError, MentoringSession};
use crate::domain::user::{AchievementKind, ExperienceSource};
use crate::ports::MentoringSessionRepository;

use super::super::user::ProgressionService;

/// Completed sessions before the mentoring-streak achievement unlocks.
const STREAK_THRESHOLD: u64 = 3;

/// Command to complete a session.
#[derive(Debug, Clone)]
pub struct CompleteSessionCommand {
    pub session_id: MentoringSessionId,
    pub user_id: UserId,
    pub role: Role,
    pub notes: Option<String>,
}

/// Handler for session completion. Mentor (or admin) only.
///
/// Completion grants the student mentoring experience and, after enough
/// sessions, the streak achievement.
pub struct CompleteSessionHandler {
    sessions: Arc<dyn MentoringSessionRepository>,
    progression: Arc<ProgressionService>,
}

impl CompleteSessionHandler {
    pub fn new(
        sessions: Arc<dyn MentoringSessionRepository>,
        progression: Arc<ProgressionService>,
    ) -> Self {
        Self {
            sessions,
            progression,
        }
    }

    pub async fn handle(&self, cmd: CompleteSessionCommand) -> Result<MentoringSession, MentoringError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| MentoringError::not_found(cmd.session_id))?;

        session.check_mentor(&cmd.user_id, cmd.role)?;
        session
            .complete(cmd.notes)
            .map_err(|e| MentoringError::invalid_state(format!("{:?}", session.status), e.to_string()))?;
        self.sessions.update(&session).await?;

        self.progression
            .grant_experience(&session.student_id, ExperienceSource::MentoringSession)
            .await
            .map_err(|e| MentoringError::infrastructure(e.to_string()))?;

        let completed = self
            .sessions
            .count_completed_for_student(&session.student_id)
            .await?;
        if completed >= STREAK_THRESHOLD {
            self.progression
                .award(&session.student_id, AchievementKind::MentorSessionStreak)
                .await
                .map_err(|e| MentoringError::infrastructure(e.to_string()))?;
        }

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryMentoringSessions, InMemoryProfiles};
    use crate::domain::foundation::Timestamp;
    use crate::domain::mentoring::SessionStatus;
    use crate::ports::ProfileRepository;

    struct Fixture {
        handler: CompleteSessionHandler,
        sessions: Arc<InMemoryMentoringSessions>,
        profiles: Arc<InMemoryProfiles>,
    }

    fn fixture() -> Fixture {
        let sessions = Arc::new(InMemoryMentoringSessions::new());
        let profiles = Arc::new(InMemoryProfiles::new());
        Fixture {
            handler: CompleteSessionHandler::new(
                sessions.clone(),
                Arc::new(ProgressionService::new(profiles.clone())),
            ),
            sessions,
            profiles,
        }
    }

    async fn seed_confirmed(fixture: &Fixture, mentor: UserId, student: UserId) -> MentoringSession {
        let mut session = MentoringSession::request(
            MentoringSessionId::new(),
            mentor,
            student,
            None,
            "Error handling",
            Timestamp::now().add_days(1),
            45,
        )
        .unwrap();
        session.confirm().unwrap();
        fixture.sessions.save(&session).await.unwrap();
        session
    }

    #[tokio::test]
    async fn mentor_completes_and_student_earns_experience() {
        let fixture = fixture();
        let mentor = UserId::new();
        let student = UserId::new();
        let session = seed_confirmed(&fixture, mentor, student).await;

        let completed = fixture
            .handler
            .handle(CompleteSessionCommand {
                session_id: session.id,
                user_id: mentor,
                role: Role::Mentor,
                notes: Some("Good progress".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(completed.status, SessionStatus::Completed);
        assert_eq!(fixture.profiles.profile_of(&student).unwrap().experience, 75);
    }

    #[tokio::test]
    async fn streak_achievement_after_three_sessions() {
        let fixture = fixture();
        let student = UserId::new();

        for _ in 0..3 {
            let mentor = UserId::new();
            let session = seed_confirmed(&fixture, mentor, student).await;
            fixture
                .handler
                .handle(CompleteSessionCommand {
                    session_id: session.id,
                    user_id: mentor,
                    role: Role::Mentor,
                    notes: None,
                })
                .await
                .unwrap();
        }

        assert!(fixture
            .profiles
            .has_achievement(&student, AchievementKind::MentorSessionStreak)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn student_cannot_complete() {
        let fixture = fixture();
        let mentor = UserId::new();
        let student = UserId::new();
        let session = seed_confirmed(&fixture, mentor, student).await;

        let err = fixture
            .handler
            .handle(CompleteSessionCommand {
                session_id: session.id,
                user_id: student,
                role: Role::Student,
                notes: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, MentoringError::Forbidden(_)));
    }
}
