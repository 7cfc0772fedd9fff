//! UpdateArticleHandler - command handler for editing an article.

use std::sync::Arc;

use crate::domain::article::{Article, ArticleError};
use crate::domain::foundation::{ArticleId, OwnedByUser, Role, UserId};
use crate::ports::ArticleRepository;

/// Command to update an article's content.
#[derive(Debug, Clone)]
pub struct UpdateArticleCommand {
    pub article_id: ArticleId,
    pub user_id: UserId,
    pub role: Role,
    pub title: String,
    pub body: String,
}

/// Handler for article content updates. Author or admin only.
pub struct UpdateArticleHandler {
    articles: Arc<dyn ArticleRepository>,
}

impl UpdateArticleHandler {
    pub fn new(articles: Arc<dyn ArticleRepository>) -> Self {
        Self { articles }
    }

    pub async fn handle(&self, cmd: UpdateArticleCommand) -> Result<Article, ArticleError> {
        let mut article = self
            .articles
            .find_by_id(&cmd.article_id)
            .await?
            .ok_or_else(|| ArticleError::not_found(cmd.article_id))?;

        article.check_ownership_or_admin(&cmd.user_id, cmd.role)?;
        article.update_content(cmd.title, cmd.body)?;
        self.articles.update(&article).await?;
        Ok(article)
    }
}
