//! Article repository port.

use async_trait::async_trait;

use crate::domain::article::Article;
use crate::domain::foundation::{ArticleId, DomainError, UserId};

/// Repository port for Article aggregate persistence.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Save a new article.
    async fn save(&self, article: &Article) -> Result<(), DomainError>;

    /// Update an existing article.
    async fn update(&self, article: &Article) -> Result<(), DomainError>;

    /// Find an article by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, DomainError>;

    /// Find an article by its slug. Returns `None` if not found.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, DomainError>;

    /// List published articles, newest first.
    async fn list_published(&self) -> Result<Vec<Article>, DomainError>;

    /// List all articles by an author.
    async fn list_by_author(&self, author_id: &UserId) -> Result<Vec<Article>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ArticleRepository) {}
    }
}
