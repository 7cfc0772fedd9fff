//! HTTP DTOs for profile endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::user::{points_for_level, Achievement, AchievementKind, Profile};

/// Request to update the caller's profile.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Profile representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub experience: u64,
    pub level: u32,
    /// Points needed to reach the next level.
    pub next_level_at: u64,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            user_id: profile.user_id.to_string(),
            display_name: profile.display_name,
            bio: profile.bio,
            avatar: profile.avatar,
            experience: profile.experience,
            level: profile.level,
            next_level_at: points_for_level(profile.level + 1),
        }
    }
}

/// Achievement representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementResponse {
    pub id: String,
    pub kind: AchievementKind,
    pub title: &'static str,
    pub awarded_at: String,
}

impl From<Achievement> for AchievementResponse {
    fn from(achievement: Achievement) -> Self {
        Self {
            id: achievement.id.to_string(),
            kind: achievement.kind,
            title: achievement.kind.title(),
            awarded_at: achievement.awarded_at.to_rfc3339(),
        }
    }
}

/// Achievement list response.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementListResponse {
    pub achievements: Vec<AchievementResponse>,
}
