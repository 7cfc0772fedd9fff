//! Article HTTP module.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::article_routes;
