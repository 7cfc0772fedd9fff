//! PublishArticleHandler - command handler for publishing an article.

use std::sync::Arc;

use crate::domain::article::{Article, ArticleError};
use crate::domain::foundation::{ArticleId, OwnedByUser, Role, UserId};
use crate::ports::ArticleRepository;

/// Command to publish an article.
#[derive(Debug, Clone)]
pub struct PublishArticleCommand {
    pub article_id: ArticleId,
    pub user_id: UserId,
    pub role: Role,
}

/// Handler for article publication. Author or admin only.
pub struct PublishArticleHandler {
    articles: Arc<dyn ArticleRepository>,
}

impl PublishArticleHandler {
    pub fn new(articles: Arc<dyn ArticleRepository>) -> Self {
        Self { articles }
    }

    pub async fn handle(&self, cmd: PublishArticleCommand) -> Result<Article, ArticleError> {
        let mut article = self
            .articles
            .find_by_id(&cmd.article_id)
            .await?
            .ok_or_else(|| ArticleError::not_found(cmd.article_id))?;

        article.check_ownership_or_admin(&cmd.user_id, cmd.role)?;
        article
            .publish()
            .map_err(|e| ArticleError::invalid_state(format!("{:?}", article.status), e.to_string()))?;
        self.articles.update(&article).await?;
        Ok(article)
    }
}
