//! User context - profiles, experience and achievements.

mod achievement;
mod errors;
mod profile;

pub use achievement::{Achievement, AchievementKind};
pub use errors::ProfileError;
pub use profile::{level_for_points, points_for_level, ExperienceSource, Profile};
