//! Article context handlers.

mod archive_article;
mod create_article;
mod publish_article;
mod update_article;

pub use archive_article::{ArchiveArticleCommand, ArchiveArticleHandler};
pub use create_article::{CreateArticleCommand, CreateArticleHandler};
pub use publish_article::{PublishArticleCommand, PublishArticleHandler};
pub use update_article::{UpdateArticleCommand, UpdateArticleHandler};
