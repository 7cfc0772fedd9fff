//! Scholarship HTTP module.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{application_routes, scholarship_routes};
