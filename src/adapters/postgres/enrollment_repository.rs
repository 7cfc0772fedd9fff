//! PostgreSQL implementation of EnrollmentRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::enrollment::{Enrollment, EnrollmentStatus};
use crate::domain::foundation::{CourseId, DomainError, EnrollmentId, ErrorCode, Timestamp, UserId};
use crate::ports::EnrollmentRepository;

/// PostgreSQL implementation of the EnrollmentRepository port.
pub struct PostgresEnrollmentRepository {
    pool: PgPool,
}

impl PostgresEnrollmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EnrollmentRow {
    id: Uuid,
    user_id: Uuid,
    course_id: Uuid,
    status: String,
    progress: i16,
    next_report_due: Option<DateTime<Utc>>,
    enrolled_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EnrollmentRow> for Enrollment {
    type Error = DomainError;

    fn try_from(row: EnrollmentRow) -> Result<Self, Self::Error> {
        Ok(Enrollment {
            id: EnrollmentId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            course_id: CourseId::from_uuid(row.course_id),
            status: parse_status(&row.status)?,
            progress: row.progress.clamp(0, 100) as u8,
            next_report_due: row.next_report_due.map(Timestamp::from_datetime),
            enrolled_at: Timestamp::from_datetime(row.enrolled_at),
            completed_at: row.completed_at.map(Timestamp::from_datetime),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_status(s: &str) -> Result<EnrollmentStatus, DomainError> {
    match s {
        "active" => Ok(EnrollmentStatus::Active),
        "completed" => Ok(EnrollmentStatus::Completed),
        "revoked" => Ok(EnrollmentStatus::Revoked),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid enrollment status: {}", s),
        )),
    }
}

fn status_to_string(status: &EnrollmentStatus) -> &'static str {
    match status {
        EnrollmentStatus::Active => "active",
        EnrollmentStatus::Completed => "completed",
        EnrollmentStatus::Revoked => "revoked",
    }
}

const SELECT_COLUMNS: &str = "id, user_id, course_id, status, progress, next_report_due, \
                              enrolled_at, completed_at, updated_at";

#[async_trait]
impl EnrollmentRepository for PostgresEnrollmentRepository {
    async fn save(&self, enrollment: &Enrollment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO enrollments (
                id, user_id, course_id, status, progress, next_report_due,
                enrolled_at, completed_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(enrollment.id.as_uuid())
        .bind(enrollment.user_id.as_uuid())
        .bind(enrollment.course_id.as_uuid())
        .bind(status_to_string(&enrollment.status))
        .bind(enrollment.progress as i16)
        .bind(enrollment.next_report_due.map(|t| *t.as_datetime()))
        .bind(enrollment.enrolled_at.as_datetime())
        .bind(enrollment.completed_at.map(|t| *t.as_datetime()))
        .bind(enrollment.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("enrollments_user_id_course_id_key") {
                    return DomainError::new(
                        ErrorCode::AlreadyEnrolled,
                        "User is already enrolled in this course",
                    );
                }
            }
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save enrollment: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, enrollment: &Enrollment) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE enrollments SET
                status = $2,
                progress = $3,
                next_report_due = $4,
                completed_at = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(enrollment.id.as_uuid())
        .bind(status_to_string(&enrollment.status))
        .bind(enrollment.progress as i16)
        .bind(enrollment.next_report_due.map(|t| *t.as_datetime()))
        .bind(enrollment.completed_at.map(|t| *t.as_datetime()))
        .bind(enrollment.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update enrollment: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::EnrollmentNotFound,
                "Enrollment not found",
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &EnrollmentId) -> Result<Option<Enrollment>, DomainError> {
        let row: Option<EnrollmentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM enrollments WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find enrollment: {}", e),
            )
        })?;

        row.map(Enrollment::try_from).transpose()
    }

    async fn find_by_user_and_course(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<Enrollment>, DomainError> {
        let row: Option<EnrollmentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM enrollments WHERE user_id = $1 AND course_id = $2",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .bind(course_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find enrollment: {}", e),
            )
        })?;

        row.map(Enrollment::try_from).transpose()
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Enrollment>, DomainError> {
        let rows: Vec<EnrollmentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM enrollments WHERE user_id = $1 ORDER BY enrolled_at DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list enrollments: {}", e),
            )
        })?;

        rows.into_iter().map(Enrollment::try_from).collect()
    }

    async fn count_completed_by_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM enrollments WHERE user_id = $1 AND status = 'completed'",
        )
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to count enrollments: {}", e),
            )
        })?;

        Ok(count.max(0) as u64)
    }

    async fn list_report_due(&self, due_by: Timestamp) -> Result<Vec<Enrollment>, DomainError> {
        let rows: Vec<EnrollmentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM enrollments \
             WHERE status = 'active' AND next_report_due IS NOT NULL AND next_report_due <= $1 \
             ORDER BY next_report_due",
            SELECT_COLUMNS
        ))
        .bind(due_by.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list due reports: {}", e),
            )
        })?;

        rows.into_iter().map(Enrollment::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrips() {
        for status in [
            EnrollmentStatus::Active,
            EnrollmentStatus::Completed,
            EnrollmentStatus::Revoked,
        ] {
            assert_eq!(parse_status(status_to_string(&status)).unwrap(), status);
        }
        assert!(parse_status("paused").is_err());
    }
}
