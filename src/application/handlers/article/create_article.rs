//! CreateArticleHandler - command handler for drafting an article.

use std::sync::Arc;

use crate::domain::article::{Article, ArticleError};
use crate::domain::foundation::{ArticleId, Role, UserId};
use crate::ports::ArticleRepository;

/// Command to create a draft article.
#[derive(Debug, Clone)]
pub struct CreateArticleCommand {
    pub author_id: UserId,
    pub role: Role,
    pub title: String,
    pub slug: String,
    pub body: String,
}

/// Handler for article creation. Mentors and admins only.
pub struct CreateArticleHandler {
    articles: Arc<dyn ArticleRepository>,
}

impl CreateArticleHandler {
    pub fn new(articles: Arc<dyn ArticleRepository>) -> Self {
        Self { articles }
    }

    pub async fn handle(&self, cmd: CreateArticleCommand) -> Result<Article, ArticleError> {
        cmd.role.require_mentor()?;

        if self.articles.find_by_slug(&cmd.slug).await?.is_some() {
            return Err(ArticleError::slug_taken(cmd.slug));
        }

        let article = Article::create(
            ArticleId::new(),
            cmd.author_id,
            cmd.title,
            cmd.slug,
            cmd.body,
        )?;
        self.articles.save(&article).await?;
        Ok(article)
    }
}
