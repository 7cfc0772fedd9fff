//! PostgreSQL implementation of MentoringSessionRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    CourseId, DomainError, ErrorCode, MentoringSessionId, Timestamp, UserId,
};
use crate::domain::mentoring::{MentoringSession, SessionStatus};
use crate::ports::MentoringSessionRepository;

/// PostgreSQL implementation of the MentoringSessionRepository port.
pub struct PostgresMentoringSessionRepository {
    pool: PgPool,
}

impl PostgresMentoringSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    mentor_id: Uuid,
    student_id: Uuid,
    course_id: Option<Uuid>,
    topic: String,
    scheduled_at: DateTime<Utc>,
    duration_minutes: i16,
    status: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SessionRow> for MentoringSession {
    type Error = DomainError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        Ok(MentoringSession {
            id: MentoringSessionId::from_uuid(row.id),
            mentor_id: UserId::from_uuid(row.mentor_id),
            student_id: UserId::from_uuid(row.student_id),
            course_id: row.course_id.map(CourseId::from_uuid),
            topic: row.topic,
            scheduled_at: Timestamp::from_datetime(row.scheduled_at),
            duration_minutes: row.duration_minutes.max(0) as u16,
            status: parse_status(&row.status)?,
            notes: row.notes,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_status(s: &str) -> Result<SessionStatus, DomainError> {
    match s {
        "requested" => Ok(SessionStatus::Requested),
        "confirmed" => Ok(SessionStatus::Confirmed),
        "completed" => Ok(SessionStatus::Completed),
        "cancelled" => Ok(SessionStatus::Cancelled),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid session status: {}", s),
        )),
    }
}

fn status_to_string(status: &SessionStatus) -> &'static str {
    match status {
        SessionStatus::Requested => "requested",
        SessionStatus::Confirmed => "confirmed",
        SessionStatus::Completed => "completed",
        SessionStatus::Cancelled => "cancelled",
    }
}

const SELECT_COLUMNS: &str = "id, mentor_id, student_id, course_id, topic, scheduled_at, \
                              duration_minutes, status, notes, created_at, updated_at";

#[async_trait]
impl MentoringSessionRepository for PostgresMentoringSessionRepository {
    async fn save(&self, session: &MentoringSession) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO mentoring_sessions (
                id, mentor_id, student_id, course_id, topic, scheduled_at,
                duration_minutes, status, notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(session.id.as_uuid())
        .bind(session.mentor_id.as_uuid())
        .bind(session.student_id.as_uuid())
        .bind(session.course_id.map(|id| *id.as_uuid()))
        .bind(&session.topic)
        .bind(session.scheduled_at.as_datetime())
        .bind(session.duration_minutes as i16)
        .bind(status_to_string(&session.status))
        .bind(&session.notes)
        .bind(session.created_at.as_datetime())
        .bind(session.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save session: {}", e))
        })?;

        Ok(())
    }

    async fn update(&self, session: &MentoringSession) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE mentoring_sessions SET
                status = $2,
                notes = $3,
                scheduled_at = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(session.id.as_uuid())
        .bind(status_to_string(&session.status))
        .bind(&session.notes)
        .bind(session.scheduled_at.as_datetime())
        .bind(session.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update session: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::SessionNotFound, "Session not found"));
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &MentoringSessionId,
    ) -> Result<Option<MentoringSession>, DomainError> {
        let row: Option<SessionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM mentoring_sessions WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find session: {}", e))
        })?;

        row.map(MentoringSession::try_from).transpose()
    }

    async fn list_for_participant(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<MentoringSession>, DomainError> {
        let rows: Vec<SessionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM mentoring_sessions \
             WHERE mentor_id = $1 OR student_id = $1 \
             ORDER BY scheduled_at",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list sessions: {}", e))
        })?;

        rows.into_iter().map(MentoringSession::try_from).collect()
    }

    async fn count_completed_for_student(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM mentoring_sessions \
             WHERE student_id = $1 AND status = 'completed'",
        )
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to count sessions: {}", e),
            )
        })?;

        Ok(count.max(0) as u64)
    }
}
