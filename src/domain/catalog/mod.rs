//! Catalog context - courses authored by mentors.

mod course;
mod errors;

pub use course::{Course, CourseLevel, CourseStatus};
pub use errors::CatalogError;
