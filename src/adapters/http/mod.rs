//! HTTP adapter - axum routers, handlers and DTOs per context.

pub mod article;
pub mod billing;
pub mod catalog;
pub mod enrollment;
pub mod error;
pub mod mentoring;
pub mod middleware;
pub mod profile;
pub mod router;
pub mod scholarship;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use router::build_router;
pub use state::AppState;
