//! HTTP handlers for article endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::article::{
    ArchiveArticleCommand, CreateArticleCommand, PublishArticleCommand, UpdateArticleCommand,
};
use crate::domain::article::{ArticleError, ArticleStatus};
use crate::domain::foundation::{ArticleId, Role};

use super::super::error::ApiError;
use super::super::middleware::{OptionalAuth, RequireAuth};
use super::super::state::AppState;
use super::dto::{
    ArticleListResponse, ArticleResponse, CreateArticleRequest, UpdateArticleRequest,
};

/// GET /api/articles - list published articles
pub async fn list_articles(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let articles = state.articles.list_published().await?;
    let response = ArticleListResponse {
        articles: articles.into_iter().map(ArticleResponse::from).collect(),
    };
    Ok(Json(response))
}

/// GET /api/articles/mine - list the caller's articles (mentor/admin)
pub async fn list_my_articles(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    user.role.require_mentor()?;

    let articles = state.articles.list_by_author(&user.user_id).await?;
    let response = ArticleListResponse {
        articles: articles.into_iter().map(ArticleResponse::from).collect(),
    };
    Ok(Json(response))
}

/// GET /api/articles/:id - get an article by id or slug
pub async fn get_article(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(id_or_slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let article = match id_or_slug.parse::<ArticleId>() {
        Ok(id) => state.articles.find_by_id(&id).await?,
        Err(_) => state.articles.find_by_slug(&id_or_slug).await?,
    }
    .ok_or_else(|| ArticleError::not_found_by_slug(&id_or_slug))?;

    if article.status != ArticleStatus::Published {
        let can_see = user
            .as_ref()
            .map(|u| u.role == Role::Admin || u.user_id == article.author_id)
            .unwrap_or(false);
        if !can_see {
            return Err(ArticleError::not_found_by_slug(&id_or_slug).into());
        }
    }

    Ok(Json(ArticleResponse::from(article)))
}

/// POST /api/articles - create a draft article (mentor/admin)
pub async fn create_article(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CreateArticleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.create_article_handler();
    let article = handler
        .handle(CreateArticleCommand {
            author_id: user.user_id,
            role: user.role,
            title: request.title,
            slug: request.slug,
            body: request.body,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ArticleResponse::from(article))))
}

/// PUT /api/articles/:id - update an article (author/admin)
pub async fn update_article(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(article_id): Path<ArticleId>,
    Json(request): Json<UpdateArticleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.update_article_handler();
    let article = handler
        .handle(UpdateArticleCommand {
            article_id,
            user_id: user.user_id,
            role: user.role,
            title: request.title,
            body: request.body,
        })
        .await?;

    Ok(Json(ArticleResponse::from(article)))
}

/// POST /api/articles/:id/publish - publish an article (author/admin)
pub async fn publish_article(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(article_id): Path<ArticleId>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.publish_article_handler();
    let article = handler
        .handle(PublishArticleCommand {
            article_id,
            user_id: user.user_id,
            role: user.role,
        })
        .await?;

    Ok(Json(ArticleResponse::from(article)))
}

/// POST /api/articles/:id/archive - archive an article (author/admin)
pub async fn archive_article(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(article_id): Path<ArticleId>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.archive_article_handler();
    let article = handler
        .handle(ArchiveArticleCommand {
            article_id,
            user_id: user.user_id,
            role: user.role,
        })
        .await?;

    Ok(Json(ArticleResponse::from(article)))
}
