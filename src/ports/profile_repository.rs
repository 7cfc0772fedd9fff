//! Profile repository port (profiles and achievements).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{Achievement, AchievementKind, Profile};

/// Repository port for user profiles and awarded achievements.
///
/// Implementations must enforce one achievement per (user, kind)
/// (mapped to `DuplicateAchievement`).
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Save a new profile.
    async fn save(&self, profile: &Profile) -> Result<(), DomainError>;

    /// Update an existing profile.
    async fn update(&self, profile: &Profile) -> Result<(), DomainError>;

    /// Find a profile by user ID. Returns `None` if not created yet.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError>;

    /// Award an achievement.
    ///
    /// Returns `false` if the user already holds this kind (idempotent award).
    async fn award_achievement(&self, achievement: &Achievement) -> Result<bool, DomainError>;

    /// True if the user holds the given achievement.
    async fn has_achievement(
        &self,
        user_id: &UserId,
        kind: AchievementKind,
    ) -> Result<bool, DomainError>;

    /// List a user's achievements, newest first.
    async fn list_achievements(&self, user_id: &UserId)
        -> Result<Vec<Achievement>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ProfileRepository) {}
    }
}
