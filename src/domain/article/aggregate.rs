//! Article aggregate entity.
//!
//! Articles are editorial content written by mentors and admins, published
//! into a public feed alongside the course catalog.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ArticleId, DomainError, OwnedByUser, StateMachine, Timestamp, UserId, ValidationError,
};

/// Publication status of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    Draft,
    Published,
    Archived,
}

impl StateMachine for ArticleStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ArticleStatus::*;
        matches!(
            (self, target),
            (Draft, Published) | (Published, Archived) | (Archived, Published)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ArticleStatus::*;
        match self {
            Draft => vec![Published],
            Published => vec![Archived],
            Archived => vec![Published],
        }
    }
}

/// Article aggregate.
///
/// # Invariants
///
/// - `slug` is lowercase kebab-case and unique
/// - `published_at` is set exactly when first published
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,

    /// Author who owns this article.
    pub author_id: UserId,

    pub title: String,

    pub slug: String,

    pub body: String,

    pub status: ArticleStatus,

    pub published_at: Option<Timestamp>,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,
}

impl Article {
    /// Creates a new draft article.
    pub fn create(
        id: ArticleId,
        author_id: UserId,
        title: impl Into<String>,
        slug: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title").into());
        }
        let slug = slug.into();
        if slug.is_empty()
            || !slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            || slug.starts_with('-')
            || slug.ends_with('-')
        {
            return Err(
                ValidationError::invalid_format("slug", "must be lowercase kebab-case").into(),
            );
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            author_id,
            title,
            slug,
            body: body.into(),
            status: ArticleStatus::Draft,
            published_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Publishes the article.
    pub fn publish(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(ArticleStatus::Published)?;
        let now = Timestamp::now();
        if self.published_at.is_none() {
            self.published_at = Some(now);
        }
        self.updated_at = now;
        Ok(())
    }

    /// Archives the article from the public feed.
    pub fn archive(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(ArticleStatus::Archived)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Updates title and body.
    pub fn update_content(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<(), DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title").into());
        }
        self.title = title;
        self.body = body.into();
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

impl OwnedByUser for Article {
    fn owner_id(&self) -> &UserId {
        &self.author_id
    }
}
