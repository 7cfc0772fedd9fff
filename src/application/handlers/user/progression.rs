//! ProgressionService - experience grants and achievement awards.
//!
//! Shared by the enrollment, mentoring and scholarship handlers: every
//! learning activity funnels through here so the level math and the
//! once-per-user achievement rule live in one place.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{Achievement, AchievementKind, ExperienceSource, Profile, ProfileError};
use crate::ports::ProfileRepository;

/// Grants experience and awards achievements against the profile store.
pub struct ProgressionService {
    profiles: Arc<dyn ProfileRepository>,
}

impl ProgressionService {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// Loads the profile, creating a fresh one on first touch.
    pub async fn get_or_create(&self, user_id: &UserId) -> Result<Profile, ProfileError> {
        if let Some(profile) = self.profiles.find_by_user(user_id).await? {
            return Ok(profile);
        }

        let profile = Profile::create(*user_id, "Learner")?;
        self.profiles.save(&profile).await?;
        Ok(profile)
    }

    /// Records the user's contact address on their profile.
    pub async fn attach_email(
        &self,
        user_id: &UserId,
        email: &str,
    ) -> Result<(), ProfileError> {
        let mut profile = self.get_or_create(user_id).await?;
        if profile.email.as_deref() != Some(email) {
            profile.set_email(email);
            self.profiles.update(&profile).await?;
        }
        Ok(())
    }

    /// Grants experience for an activity, persisting the new total.
    ///
    /// Returns the new level if the grant crossed a threshold.
    pub async fn grant_experience(
        &self,
        user_id: &UserId,
        source: ExperienceSource,
    ) -> Result<Option<u32>, ProfileError> {
        let mut profile = self.get_or_create(user_id).await?;
        let level_up = profile.grant_experience(source);
        self.profiles.update(&profile).await?;

        if let Some(level) = level_up {
            tracing::info!(user_id = %user_id, level, "user leveled up");
        }
        Ok(level_up)
    }

    /// Awards an achievement if the user does not already hold it.
    ///
    /// Returns `true` if the achievement was newly awarded.
    pub async fn award(
        &self,
        user_id: &UserId,
        kind: AchievementKind,
    ) -> Result<bool, ProfileError> {
        // Ensure the profile row exists before the achievement FK lands.
        self.get_or_create(user_id).await?;

        let achievement = Achievement::award(*user_id, kind);
        let awarded = self.profiles.award_achievement(&achievement).await?;
        if awarded {
            tracing::info!(user_id = %user_id, kind = kind.as_str(), "achievement awarded");
        }
        Ok(awarded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockProfileRepository {
        profiles: Mutex<Vec<Profile>>,
        achievements: Mutex<Vec<Achievement>>,
    }

    impl MockProfileRepository {
        fn new() -> Self {
            Self {
                profiles: Mutex::new(Vec::new()),
                achievements: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ProfileRepository for MockProfileRepository {
        async fn save(&self, profile: &Profile) -> Result<(), DomainError> {
            self.profiles.lock().unwrap().push(profile.clone());
            Ok(())
        }

        async fn update(&self, profile: &Profile) -> Result<(), DomainError> {
            let mut profiles = self.profiles.lock().unwrap();
            if let Some(p) = profiles.iter_mut().find(|p| p.user_id == profile.user_id) {
                *p = profile.clone();
            }
            Ok(())
        }

        async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
            Ok(self
                .profiles
                .lock()
                .unwrap()
                .iter()
                .find(|p| &p.user_id == user_id)
                .cloned())
        }

        async fn award_achievement(
            &self,
            achievement: &Achievement,
        ) -> Result<bool, DomainError> {
            let mut achievements = self.achievements.lock().unwrap();
            if achievements
                .iter()
                .any(|a| a.user_id == achievement.user_id && a.kind == achievement.kind)
            {
                return Ok(false);
            }
            achievements.push(achievement.clone());
            Ok(true)
        }

        async fn has_achievement(
            &self,
            user_id: &UserId,
            kind: AchievementKind,
        ) -> Result<bool, DomainError> {
            Ok(self
                .achievements
                .lock()
                .unwrap()
                .iter()
                .any(|a| &a.user_id == user_id && a.kind == kind))
        }

        async fn list_achievements(
            &self,
            user_id: &UserId,
        ) -> Result<Vec<Achievement>, DomainError> {
            Ok(self
                .achievements
                .lock()
                .unwrap()
                .iter()
                .filter(|a| &a.user_id == user_id)
                .cloned()
                .collect())
        }
    }

    #[tokio::test]
    async fn get_or_create_builds_profile_on_first_touch() {
        let repo = Arc::new(MockProfileRepository::new());
        let service = ProgressionService::new(repo.clone());
        let user = UserId::new();

        let profile = service.get_or_create(&user).await.unwrap();
        assert_eq!(profile.level, 1);

        // Second call returns the same row, not a fresh one.
        let again = service.get_or_create(&user).await.unwrap();
        assert_eq!(again.created_at, profile.created_at);
        assert_eq!(repo.profiles.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn grant_experience_persists_and_reports_level_up() {
        let repo = Arc::new(MockProfileRepository::new());
        let service = ProgressionService::new(repo.clone());
        let user = UserId::new();

        assert_eq!(
            service
                .grant_experience(&user, ExperienceSource::CourseCompletion)
                .await
                .unwrap(),
            None
        );
        let level_up = service
            .grant_experience(&user, ExperienceSource::CourseCompletion)
            .await
            .unwrap();
        assert_eq!(level_up, Some(2));

        let stored = repo.find_by_user(&user).await.unwrap().unwrap();
        assert_eq!(stored.experience, 500);
        assert_eq!(stored.level, 2);
    }

    #[tokio::test]
    async fn award_is_idempotent_per_kind() {
        let repo = Arc::new(MockProfileRepository::new());
        let service = ProgressionService::new(repo.clone());
        let user = UserId::new();

        assert!(service
            .award(&user, AchievementKind::FirstEnrollment)
            .await
            .unwrap());
        assert!(!service
            .award(&user, AchievementKind::FirstEnrollment)
            .await
            .unwrap());
        assert!(repo
            .has_achievement(&user, AchievementKind::FirstEnrollment)
            .await
            .unwrap());
    }
}
