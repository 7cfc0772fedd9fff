//! Mentoring session aggregate entity.
//!
//! A mentoring session is requested by a student, confirmed by a mentor and
//! later completed or cancelled. Only the two participants (or an admin)
//! may read or mutate a session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CourseId, DomainError, ErrorCode, MentoringSessionId, Role, StateMachine, Timestamp, UserId,
    ValidationError,
};

/// Lifecycle status of a mentoring session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Requested by the student, awaiting mentor confirmation.
    Requested,

    /// Confirmed by the mentor.
    Confirmed,

    /// Held and closed out by the mentor.
    Completed,

    /// Cancelled by either participant before completion.
    Cancelled,
}

impl StateMachine for SessionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionStatus::*;
        matches!(
            (self, target),
            (Requested, Confirmed)
                | (Requested, Cancelled)
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionStatus::*;
        match self {
            Requested => vec![Confirmed, Cancelled],
            Confirmed => vec![Completed, Cancelled],
            Completed | Cancelled => vec![],
        }
    }
}

/// Mentoring session aggregate.
///
/// # Invariants
///
/// - mentor and student are distinct users
/// - `duration_minutes` is 15-240
/// - status transitions follow the state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentoringSession {
    pub id: MentoringSessionId,

    pub mentor_id: UserId,

    pub student_id: UserId,

    /// Course this session relates to, if any.
    pub course_id: Option<CourseId>,

    pub topic: String,

    pub scheduled_at: Timestamp,

    pub duration_minutes: u16,

    pub status: SessionStatus,

    /// Mentor notes recorded at completion.
    pub notes: Option<String>,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,
}

impl MentoringSession {
    /// Creates a session request from a student.
    pub fn request(
        id: MentoringSessionId,
        mentor_id: UserId,
        student_id: UserId,
        course_id: Option<CourseId>,
        topic: impl Into<String>,
        scheduled_at: Timestamp,
        duration_minutes: u16,
    ) -> Result<Self, DomainError> {
        if mentor_id == student_id {
            return Err(DomainError::validation(
                "mentor_id",
                "Mentor and student must be different users",
            ));
        }
        let topic = topic.into();
        if topic.trim().is_empty() {
            return Err(ValidationError::empty_field("topic").into());
        }
        if !(15..=240).contains(&duration_minutes) {
            return Err(ValidationError::out_of_range(
                "duration_minutes",
                15,
                240,
                duration_minutes as i64,
            )
            .into());
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            mentor_id,
            student_id,
            course_id,
            topic,
            scheduled_at,
            duration_minutes,
            status: SessionStatus::Requested,
            notes: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Mentor confirms the requested session.
    pub fn confirm(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(SessionStatus::Confirmed)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Mentor completes a confirmed session, optionally recording notes.
    pub fn complete(&mut self, notes: Option<String>) -> Result<(), DomainError> {
        self.status = self.status.transition_to(SessionStatus::Completed)?;
        self.notes = notes;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Either participant cancels before completion.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(SessionStatus::Cancelled)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// True if the user participates in this session.
    pub fn is_participant(&self, user_id: &UserId) -> bool {
        &self.mentor_id == user_id || &self.student_id == user_id
    }

    /// Policy check: participants and admins may access the session.
    pub fn check_participant(&self, user_id: &UserId, role: Role) -> Result<(), DomainError> {
        if role == Role::Admin || self.is_participant(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "User is not a participant of this session",
            ))
        }
    }

    /// Policy check: only the mentor (or an admin) confirms and completes.
    pub fn check_mentor(&self, user_id: &UserId, role: Role) -> Result<(), DomainError> {
        if role == Role::Admin || &self.mentor_id == user_id {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Only the mentor may perform this action",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requested_session() -> MentoringSession {
        MentoringSession::request(
            MentoringSessionId::new(),
            UserId::new(),
            UserId::new(),
            None,
            "Borrow checker deep dive",
            Timestamp::now().add_days(3),
            60,
        )
        .unwrap()
    }

    #[test]
    fn request_starts_in_requested_status() {
        let session = requested_session();
        assert_eq!(session.status, SessionStatus::Requested);
        assert!(session.notes.is_none());
    }

    #[test]
    fn request_rejects_self_mentoring() {
        let user = UserId::new();
        let result = MentoringSession::request(
            MentoringSessionId::new(),
            user,
            user,
            None,
            "Topic",
            Timestamp::now(),
            60,
        );
        assert!(result.is_err());
    }

    #[test]
    fn request_rejects_out_of_range_duration() {
        for minutes in [0, 14, 241] {
            let result = MentoringSession::request(
                MentoringSessionId::new(),
                UserId::new(),
                UserId::new(),
                None,
                "Topic",
                Timestamp::now(),
                minutes,
            );
            assert!(result.is_err(), "{} minutes should be rejected", minutes);
        }
    }

    #[test]
    fn confirm_then_complete_records_notes() {
        let mut session = requested_session();
        session.confirm().unwrap();
        session
            .complete(Some("Covered lifetimes and Pin".to_string()))
            .unwrap();

        assert_eq!(session.status, SessionStatus::Completed);
        assert_eq!(session.notes.as_deref(), Some("Covered lifetimes and Pin"));
    }

    #[test]
    fn requested_session_cannot_complete_directly() {
        let mut session = requested_session();
        assert!(session.complete(None).is_err());
    }

    #[test]
    fn cancel_allowed_before_completion_only() {
        let mut session = requested_session();
        session.confirm().unwrap();
        session.cancel().unwrap();
        assert_eq!(session.status, SessionStatus::Cancelled);

        let mut done = requested_session();
        done.confirm().unwrap();
        done.complete(None).unwrap();
        assert!(done.cancel().is_err());
    }

    #[test]
    fn participant_policy_admits_both_parties_and_admin() {
        let session = requested_session();
        let outsider = UserId::new();

        assert!(session.check_participant(&session.mentor_id, Role::Mentor).is_ok());
        assert!(session.check_participant(&session.student_id, Role::Student).is_ok());
        assert!(session.check_participant(&outsider, Role::Admin).is_ok());
        assert!(session.check_participant(&outsider, Role::Student).is_err());
    }

    #[test]
    fn mentor_policy_rejects_the_student() {
        let session = requested_session();
        assert!(session.check_mentor(&session.mentor_id, Role::Mentor).is_ok());
        assert!(session.check_mentor(&session.student_id, Role::Student).is_err());
    }
}
