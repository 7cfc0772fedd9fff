//! PostgreSQL implementation of CourseRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::{Course, CourseLevel, CourseStatus};
use crate::domain::foundation::{CourseId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::CourseRepository;

/// PostgreSQL implementation of the CourseRepository port.
pub struct PostgresCourseRepository {
    pool: PgPool,
}

impl PostgresCourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CourseRow {
    id: Uuid,
    mentor_id: Uuid,
    title: String,
    slug: String,
    description: String,
    price: i64,
    level: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CourseRow> for Course {
    type Error = DomainError;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        Ok(Course {
            id: CourseId::from_uuid(row.id),
            mentor_id: UserId::from_uuid(row.mentor_id),
            title: row.title,
            slug: row.slug,
            description: row.description,
            price: row.price,
            level: parse_level(&row.level)?,
            status: parse_status(&row.status)?,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_level(s: &str) -> Result<CourseLevel, DomainError> {
    match s {
        "beginner" => Ok(CourseLevel::Beginner),
        "intermediate" => Ok(CourseLevel::Intermediate),
        "advanced" => Ok(CourseLevel::Advanced),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid course level: {}", s),
        )),
    }
}

fn level_to_string(level: &CourseLevel) -> &'static str {
    match level {
        CourseLevel::Beginner => "beginner",
        CourseLevel::Intermediate => "intermediate",
        CourseLevel::Advanced => "advanced",
    }
}

fn parse_status(s: &str) -> Result<CourseStatus, DomainError> {
    match s {
        "draft" => Ok(CourseStatus::Draft),
        "published" => Ok(CourseStatus::Published),
        "archived" => Ok(CourseStatus::Archived),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid course status: {}", s),
        )),
    }
}

fn status_to_string(status: &CourseStatus) -> &'static str {
    match status {
        CourseStatus::Draft => "draft",
        CourseStatus::Published => "published",
        CourseStatus::Archived => "archived",
    }
}

const SELECT_COLUMNS: &str = "id, mentor_id, title, slug, description, price, level, status, \
                              created_at, updated_at";

#[async_trait]
impl CourseRepository for PostgresCourseRepository {
    async fn save(&self, course: &Course) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO courses (
                id, mentor_id, title, slug, description, price, level, status,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(course.id.as_uuid())
        .bind(course.mentor_id.as_uuid())
        .bind(&course.title)
        .bind(&course.slug)
        .bind(&course.description)
        .bind(course.price)
        .bind(level_to_string(&course.level))
        .bind(status_to_string(&course.status))
        .bind(course.created_at.as_datetime())
        .bind(course.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("courses_slug_key") {
                    return DomainError::new(ErrorCode::SlugTaken, "Slug is already taken")
                        .with_detail("slug", course.slug.clone());
                }
            }
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save course: {}", e))
        })?;

        Ok(())
    }

    async fn update(&self, course: &Course) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE courses SET
                title = $2,
                description = $3,
                price = $4,
                level = $5,
                status = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(course.id.as_uuid())
        .bind(&course.title)
        .bind(&course.description)
        .bind(course.price)
        .bind(level_to_string(&course.level))
        .bind(status_to_string(&course.status))
        .bind(course.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to update course: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::CourseNotFound, "Course not found"));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        let row: Option<CourseRow> = sqlx::query_as(&format!(
            "SELECT {} FROM courses WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find course: {}", e))
        })?;

        row.map(Course::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Course>, DomainError> {
        let row: Option<CourseRow> = sqlx::query_as(&format!(
            "SELECT {} FROM courses WHERE slug = $1",
            SELECT_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find course: {}", e))
        })?;

        row.map(Course::try_from).transpose()
    }

    async fn list_published(&self) -> Result<Vec<Course>, DomainError> {
        let rows: Vec<CourseRow> = sqlx::query_as(&format!(
            "SELECT {} FROM courses WHERE status = 'published' ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list courses: {}", e))
        })?;

        rows.into_iter().map(Course::try_from).collect()
    }

    async fn list_by_mentor(&self, mentor_id: &UserId) -> Result<Vec<Course>, DomainError> {
        let rows: Vec<CourseRow> = sqlx::query_as(&format!(
            "SELECT {} FROM courses WHERE mentor_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(mentor_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list courses: {}", e))
        })?;

        rows.into_iter().map(Course::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_roundtrips() {
        for level in [CourseLevel::Beginner, CourseLevel::Intermediate, CourseLevel::Advanced] {
            assert_eq!(parse_level(level_to_string(&level)).unwrap(), level);
        }
        assert!(parse_level("expert").is_err());
    }

    #[test]
    fn status_roundtrips() {
        for status in [CourseStatus::Draft, CourseStatus::Published, CourseStatus::Archived] {
            assert_eq!(parse_status(status_to_string(&status)).unwrap(), status);
        }
        assert!(parse_status("hidden").is_err());
    }
}
