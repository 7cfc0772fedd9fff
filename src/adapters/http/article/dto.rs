//! HTTP DTOs for article endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::article::{Article, ArticleStatus};

/// Request to create an article.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArticleRequest {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub body: String,
}

/// Request to update an article.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Article representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleResponse {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub status: ArticleStatus,
    pub published_at: Option<String>,
    pub created_at: String,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.to_string(),
            author_id: article.author_id.to_string(),
            title: article.title,
            slug: article.slug,
            body: article.body,
            status: article.status,
            published_at: article.published_at.map(|t| t.to_rfc3339()),
            created_at: article.created_at.to_rfc3339(),
        }
    }
}

/// Article list response.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleListResponse {
    pub articles: Vec<ArticleResponse>,
}
