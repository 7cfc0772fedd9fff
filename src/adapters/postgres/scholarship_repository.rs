//! PostgreSQL implementation of ScholarshipRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    ApplicationId, CourseId, DomainError, ErrorCode, ScholarshipId, Timestamp, UserId,
};
use crate::domain::scholarship::{
    ApplicationStatus, Scholarship, ScholarshipApplication, ScholarshipStatus,
};
use crate::ports::ScholarshipRepository;

/// PostgreSQL implementation of the ScholarshipRepository port.
pub struct PostgresScholarshipRepository {
    pool: PgPool,
}

impl PostgresScholarshipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ScholarshipRow {
    id: Uuid,
    name: String,
    description: String,
    course_id: Uuid,
    quota: i32,
    awarded: i32,
    opens_at: DateTime<Utc>,
    closes_at: DateTime<Utc>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ScholarshipRow> for Scholarship {
    type Error = DomainError;

    fn try_from(row: ScholarshipRow) -> Result<Self, Self::Error> {
        Ok(Scholarship {
            id: ScholarshipId::from_uuid(row.id),
            name: row.name,
            description: row.description,
            course_id: CourseId::from_uuid(row.course_id),
            quota: row.quota.max(0) as u32,
            awarded: row.awarded.max(0) as u32,
            opens_at: Timestamp::from_datetime(row.opens_at),
            closes_at: Timestamp::from_datetime(row.closes_at),
            status: parse_scholarship_status(&row.status)?,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ApplicationRow {
    id: Uuid,
    scholarship_id: Uuid,
    user_id: Uuid,
    essay: String,
    status: String,
    submitted_at: DateTime<Utc>,
    decided_at: Option<DateTime<Utc>>,
    decided_by: Option<Uuid>,
}

impl TryFrom<ApplicationRow> for ScholarshipApplication {
    type Error = DomainError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        Ok(ScholarshipApplication {
            id: ApplicationId::from_uuid(row.id),
            scholarship_id: ScholarshipId::from_uuid(row.scholarship_id),
            user_id: UserId::from_uuid(row.user_id),
            essay: row.essay,
            status: parse_application_status(&row.status)?,
            submitted_at: Timestamp::from_datetime(row.submitted_at),
            decided_at: row.decided_at.map(Timestamp::from_datetime),
            decided_by: row.decided_by.map(UserId::from_uuid),
        })
    }
}

fn parse_scholarship_status(s: &str) -> Result<ScholarshipStatus, DomainError> {
    match s {
        "open" => Ok(ScholarshipStatus::Open),
        "closed" => Ok(ScholarshipStatus::Closed),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid scholarship status: {}", s),
        )),
    }
}

fn scholarship_status_to_string(status: &ScholarshipStatus) -> &'static str {
    match status {
        ScholarshipStatus::Open => "open",
        ScholarshipStatus::Closed => "closed",
    }
}

fn parse_application_status(s: &str) -> Result<ApplicationStatus, DomainError> {
    match s {
        "submitted" => Ok(ApplicationStatus::Submitted),
        "approved" => Ok(ApplicationStatus::Approved),
        "rejected" => Ok(ApplicationStatus::Rejected),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid application status: {}", s),
        )),
    }
}

fn application_status_to_string(status: &ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Submitted => "submitted",
        ApplicationStatus::Approved => "approved",
        ApplicationStatus::Rejected => "rejected",
    }
}

const SCHOLARSHIP_COLUMNS: &str = "id, name, description, course_id, quota, awarded, opens_at, \
                                   closes_at, status, created_at, updated_at";
const APPLICATION_COLUMNS: &str =
    "id, scholarship_id, user_id, essay, status, submitted_at, decided_at, decided_by";

#[async_trait]
impl ScholarshipRepository for PostgresScholarshipRepository {
    async fn save(&self, scholarship: &Scholarship) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO scholarships (
                id, name, description, course_id, quota, awarded, opens_at,
                closes_at, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(scholarship.id.as_uuid())
        .bind(&scholarship.name)
        .bind(&scholarship.description)
        .bind(scholarship.course_id.as_uuid())
        .bind(scholarship.quota as i32)
        .bind(scholarship.awarded as i32)
        .bind(scholarship.opens_at.as_datetime())
        .bind(scholarship.closes_at.as_datetime())
        .bind(scholarship_status_to_string(&scholarship.status))
        .bind(scholarship.created_at.as_datetime())
        .bind(scholarship.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save scholarship: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, scholarship: &Scholarship) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE scholarships SET
                name = $2,
                description = $3,
                quota = $4,
                awarded = $5,
                opens_at = $6,
                closes_at = $7,
                status = $8,
                updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(scholarship.id.as_uuid())
        .bind(&scholarship.name)
        .bind(&scholarship.description)
        .bind(scholarship.quota as i32)
        .bind(scholarship.awarded as i32)
        .bind(scholarship.opens_at.as_datetime())
        .bind(scholarship.closes_at.as_datetime())
        .bind(scholarship_status_to_string(&scholarship.status))
        .bind(scholarship.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update scholarship: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ScholarshipNotFound,
                "Scholarship not found",
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &ScholarshipId) -> Result<Option<Scholarship>, DomainError> {
        let row: Option<ScholarshipRow> = sqlx::query_as(&format!(
            "SELECT {} FROM scholarships WHERE id = $1",
            SCHOLARSHIP_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find scholarship: {}", e),
            )
        })?;

        row.map(Scholarship::try_from).transpose()
    }

    async fn list_open(&self) -> Result<Vec<Scholarship>, DomainError> {
        let rows: Vec<ScholarshipRow> = sqlx::query_as(&format!(
            "SELECT {} FROM scholarships WHERE status = 'open' ORDER BY closes_at",
            SCHOLARSHIP_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list scholarships: {}", e),
            )
        })?;

        rows.into_iter().map(Scholarship::try_from).collect()
    }

    async fn save_application(
        &self,
        application: &ScholarshipApplication,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO scholarship_applications (
                id, scholarship_id, user_id, essay, status, submitted_at,
                decided_at, decided_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(application.id.as_uuid())
        .bind(application.scholarship_id.as_uuid())
        .bind(application.user_id.as_uuid())
        .bind(&application.essay)
        .bind(application_status_to_string(&application.status))
        .bind(application.submitted_at.as_datetime())
        .bind(application.decided_at.map(|t| *t.as_datetime()))
        .bind(application.decided_by.map(|u| *u.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("scholarship_applications_scholarship_id_user_id_key")
                {
                    return DomainError::new(
                        ErrorCode::AlreadyApplied,
                        "User already applied to this scholarship",
                    );
                }
            }
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save application: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update_application(
        &self,
        application: &ScholarshipApplication,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE scholarship_applications SET
                status = $2,
                decided_at = $3,
                decided_by = $4
            WHERE id = $1
            "#,
        )
        .bind(application.id.as_uuid())
        .bind(application_status_to_string(&application.status))
        .bind(application.decided_at.map(|t| *t.as_datetime()))
        .bind(application.decided_by.map(|u| *u.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update application: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ApplicationNotFound,
                "Application not found",
            ));
        }
        Ok(())
    }

    async fn find_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<ScholarshipApplication>, DomainError> {
        let row: Option<ApplicationRow> = sqlx::query_as(&format!(
            "SELECT {} FROM scholarship_applications WHERE id = $1",
            APPLICATION_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find application: {}", e),
            )
        })?;

        row.map(ScholarshipApplication::try_from).transpose()
    }

    async fn find_application_by_user(
        &self,
        scholarship_id: &ScholarshipId,
        user_id: &UserId,
    ) -> Result<Option<ScholarshipApplication>, DomainError> {
        let row: Option<ApplicationRow> = sqlx::query_as(&format!(
            "SELECT {} FROM scholarship_applications \
             WHERE scholarship_id = $1 AND user_id = $2",
            APPLICATION_COLUMNS
        ))
        .bind(scholarship_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find application: {}", e),
            )
        })?;

        row.map(ScholarshipApplication::try_from).transpose()
    }

    async fn list_applications(
        &self,
        scholarship_id: &ScholarshipId,
    ) -> Result<Vec<ScholarshipApplication>, DomainError> {
        let rows: Vec<ApplicationRow> = sqlx::query_as(&format!(
            "SELECT {} FROM scholarship_applications \
             WHERE scholarship_id = $1 ORDER BY submitted_at",
            APPLICATION_COLUMNS
        ))
        .bind(scholarship_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list applications: {}", e),
            )
        })?;

        rows.into_iter()
            .map(ScholarshipApplication::try_from)
            .collect()
    }
}
