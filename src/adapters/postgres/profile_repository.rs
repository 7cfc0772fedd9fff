//! PostgreSQL implementation of ProfileRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{AchievementId, DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::{Achievement, AchievementKind, Profile};
use crate::ports::ProfileRepository;

/// PostgreSQL implementation of the ProfileRepository port.
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    user_id: Uuid,
    display_name: String,
    email: Option<String>,
    bio: Option<String>,
    avatar: Option<String>,
    experience: i64,
    level: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            user_id: UserId::from_uuid(row.user_id),
            display_name: row.display_name,
            email: row.email,
            bio: row.bio,
            avatar: row.avatar,
            experience: row.experience.max(0) as u64,
            level: row.level.max(1) as u32,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AchievementRow {
    id: Uuid,
    user_id: Uuid,
    kind: String,
    awarded_at: DateTime<Utc>,
}

impl TryFrom<AchievementRow> for Achievement {
    type Error = DomainError;

    fn try_from(row: AchievementRow) -> Result<Self, Self::Error> {
        let kind = AchievementKind::parse(&row.kind).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid achievement kind: {}", row.kind),
            )
        })?;
        Ok(Achievement {
            id: AchievementId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            kind,
            awarded_at: Timestamp::from_datetime(row.awarded_at),
        })
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn save(&self, profile: &Profile) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (
                user_id, display_name, email, bio, avatar, experience, level,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(profile.user_id.as_uuid())
        .bind(&profile.display_name)
        .bind(&profile.email)
        .bind(&profile.bio)
        .bind(&profile.avatar)
        .bind(profile.experience as i64)
        .bind(profile.level as i32)
        .bind(profile.created_at.as_datetime())
        .bind(profile.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save profile: {}", e))
        })?;

        Ok(())
    }

    async fn update(&self, profile: &Profile) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE profiles SET
                display_name = $2,
                email = $3,
                bio = $4,
                avatar = $5,
                experience = $6,
                level = $7,
                updated_at = $8
            WHERE user_id = $1
            "#,
        )
        .bind(profile.user_id.as_uuid())
        .bind(&profile.display_name)
        .bind(&profile.email)
        .bind(&profile.bio)
        .bind(&profile.avatar)
        .bind(profile.experience as i64)
        .bind(profile.level as i32)
        .bind(profile.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update profile: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::ProfileNotFound, "Profile not found"));
        }
        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            "SELECT user_id, display_name, email, bio, avatar, experience, level, \
                    created_at, updated_at \
             FROM profiles WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find profile: {}", e))
        })?;

        Ok(row.map(Profile::from))
    }

    async fn award_achievement(&self, achievement: &Achievement) -> Result<bool, DomainError> {
        // ON CONFLICT DO NOTHING keeps the award idempotent under retries.
        let result = sqlx::query(
            r#"
            INSERT INTO achievements (id, user_id, kind, awarded_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, kind) DO NOTHING
            "#,
        )
        .bind(achievement.id.as_uuid())
        .bind(achievement.user_id.as_uuid())
        .bind(achievement.kind.as_str())
        .bind(achievement.awarded_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to award achievement: {}", e),
            )
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn has_achievement(
        &self,
        user_id: &UserId,
        kind: AchievementKind,
    ) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM achievements WHERE user_id = $1 AND kind = $2",
        )
        .bind(user_id.as_uuid())
        .bind(kind.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to check achievement: {}", e),
            )
        })?;

        Ok(count > 0)
    }

    async fn list_achievements(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Achievement>, DomainError> {
        let rows: Vec<AchievementRow> = sqlx::query_as(
            "SELECT id, user_id, kind, awarded_at FROM achievements \
             WHERE user_id = $1 ORDER BY awarded_at DESC",
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list achievements: {}", e),
            )
        })?;

        rows.into_iter().map(Achievement::try_from).collect()
    }
}
