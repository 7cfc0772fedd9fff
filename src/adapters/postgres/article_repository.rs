//! PostgreSQL implementation of ArticleRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::article::{Article, ArticleStatus};
use crate::domain::foundation::{ArticleId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::ArticleRepository;

/// PostgreSQL implementation of the ArticleRepository port.
pub struct PostgresArticleRepository {
    pool: PgPool,
}

impl PostgresArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ArticleRow {
    id: Uuid,
    author_id: Uuid,
    title: String,
    slug: String,
    body: String,
    status: String,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId::from_uuid(row.id),
            author_id: UserId::from_uuid(row.author_id),
            title: row.title,
            slug: row.slug,
            body: row.body,
            status: parse_status(&row.status)?,
            published_at: row.published_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_status(s: &str) -> Result<ArticleStatus, DomainError> {
    match s {
        "draft" => Ok(ArticleStatus::Draft),
        "published" => Ok(ArticleStatus::Published),
        "archived" => Ok(ArticleStatus::Archived),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid article status: {}", s),
        )),
    }
}

fn status_to_string(status: &ArticleStatus) -> &'static str {
    match status {
        ArticleStatus::Draft => "draft",
        ArticleStatus::Published => "published",
        ArticleStatus::Archived => "archived",
    }
}

const SELECT_COLUMNS: &str =
    "id, author_id, title, slug, body, status, published_at, created_at, updated_at";

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn save(&self, article: &Article) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO articles (
                id, author_id, title, slug, body, status, published_at,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(article.id.as_uuid())
        .bind(article.author_id.as_uuid())
        .bind(&article.title)
        .bind(&article.slug)
        .bind(&article.body)
        .bind(status_to_string(&article.status))
        .bind(article.published_at.map(|t| *t.as_datetime()))
        .bind(article.created_at.as_datetime())
        .bind(article.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("articles_slug_key") {
                    return DomainError::new(ErrorCode::SlugTaken, "Slug is already taken")
                        .with_detail("slug", article.slug.clone());
                }
            }
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save article: {}", e))
        })?;

        Ok(())
    }

    async fn update(&self, article: &Article) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE articles SET
                title = $2,
                body = $3,
                status = $4,
                published_at = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(article.id.as_uuid())
        .bind(&article.title)
        .bind(&article.body)
        .bind(status_to_string(&article.status))
        .bind(article.published_at.map(|t| *t.as_datetime()))
        .bind(article.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update article: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::ArticleNotFound, "Article not found"));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, DomainError> {
        let row: Option<ArticleRow> = sqlx::query_as(&format!(
            "SELECT {} FROM articles WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find article: {}", e))
        })?;

        row.map(Article::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, DomainError> {
        let row: Option<ArticleRow> = sqlx::query_as(&format!(
            "SELECT {} FROM articles WHERE slug = $1",
            SELECT_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find article: {}", e))
        })?;

        row.map(Article::try_from).transpose()
    }

    async fn list_published(&self) -> Result<Vec<Article>, DomainError> {
        let rows: Vec<ArticleRow> = sqlx::query_as(&format!(
            "SELECT {} FROM articles WHERE status = 'published' ORDER BY published_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list articles: {}", e))
        })?;

        rows.into_iter().map(Article::try_from).collect()
    }

    async fn list_by_author(&self, author_id: &UserId) -> Result<Vec<Article>, DomainError> {
        let rows: Vec<ArticleRow> = sqlx::query_as(&format!(
            "SELECT {} FROM articles WHERE author_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(author_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list articles: {}", e))
        })?;

        rows.into_iter().map(Article::try_from).collect()
    }
}
