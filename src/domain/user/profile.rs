//! User profile with experience tracking.
//!
//! Profiles are created lazily on first touch. Experience points accrue from
//! learning activity and map to a level through a quadratic threshold curve.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, Timestamp, UserId, ValidationError};

/// Experience granted per activity, in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceSource {
    Enrollment,
    ProgressReport,
    CourseCompletion,
    MentoringSession,
    ScholarshipAward,
}

impl ExperienceSource {
    /// Points granted for one occurrence of this activity.
    pub fn points(&self) -> u32 {
        match self {
            ExperienceSource::Enrollment => 50,
            ExperienceSource::ProgressReport => 10,
            ExperienceSource::CourseCompletion => 250,
            ExperienceSource::MentoringSession => 75,
            ExperienceSource::ScholarshipAward => 100,
        }
    }
}

/// Total points required to reach the given level.
///
/// Level 1 starts at 0; each level requires 500 more points than the step
/// before it: level 2 at 500, level 3 at 1500, level 4 at 3000, ...
pub fn points_for_level(level: u32) -> u64 {
    let n = level.max(1) as u64;
    250 * n * (n - 1)
}

/// Level reached with the given total points.
pub fn level_for_points(points: u64) -> u32 {
    let mut level = 1;
    while points_for_level(level + 1) <= points {
        level += 1;
    }
    level
}

/// User profile aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Profiles are keyed by the auth subject; there is no separate id.
    pub user_id: UserId,

    pub display_name: String,

    /// Contact address for notification email, captured from the auth token
    /// or at checkout.
    pub email: Option<String>,

    pub bio: Option<String>,

    /// Reference to an uploaded avatar, if any.
    pub avatar: Option<String>,

    /// Total accumulated experience points.
    pub experience: u64,

    /// Level derived from experience. Persisted for cheap listing queries.
    pub level: u32,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,
}

impl Profile {
    /// Creates a fresh level-1 profile.
    pub fn create(user_id: UserId, display_name: impl Into<String>) -> Result<Self, DomainError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(ValidationError::empty_field("display_name").into());
        }

        let now = Timestamp::now();
        Ok(Self {
            user_id,
            display_name,
            email: None,
            bio: None,
            avatar: None,
            experience: 0,
            level: 1,
            created_at: now,
            updated_at: now,
        })
    }

    /// Updates the editable profile fields.
    pub fn update_details(
        &mut self,
        display_name: impl Into<String>,
        bio: Option<String>,
        avatar: Option<String>,
    ) -> Result<(), DomainError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(ValidationError::empty_field("display_name").into());
        }
        self.display_name = display_name;
        self.bio = bio;
        self.avatar = avatar;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Records the user's contact address.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = Some(email.into());
        self.updated_at = Timestamp::now();
    }

    /// Grants experience for an activity.
    ///
    /// Returns the new level if the grant crossed a threshold.
    pub fn grant_experience(&mut self, source: ExperienceSource) -> Option<u32> {
        let before = self.level;
        self.experience += source.points() as u64;
        self.level = level_for_points(self.experience);
        self.updated_at = Timestamp::now();
        (self.level > before).then_some(self.level)
    }
}
