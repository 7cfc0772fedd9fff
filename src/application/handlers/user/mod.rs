//! User context handlers - profile editing and progression.

mod progression;
mod update_profile;

pub use progression::ProgressionService;
pub use update_profile::{UpdateProfileCommand, UpdateProfileHandler};
