//! Catalog context handlers.

mod archive_course;
mod create_course;
mod publish_course;
mod update_course;

pub use archive_course::{ArchiveCourseCommand, ArchiveCourseHandler};
pub use create_course::{CreateCourseCommand, CreateCourseHandler};
pub use publish_course::{PublishCourseCommand, PublishCourseHandler};
pub use update_course::{UpdateCourseCommand, UpdateCourseHandler};
