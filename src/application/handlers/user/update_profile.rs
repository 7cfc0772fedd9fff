//! UpdateProfileHandler - command handler for editing the caller's profile.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::user::{Profile, ProfileError};
use crate::ports::ProfileRepository;

use super::ProgressionService;

/// Command to update the caller's profile.
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub user_id: UserId,
    pub display_name: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

/// Handler for profile updates.
pub struct UpdateProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
    progression: Arc<ProgressionService>,
}

impl UpdateProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, progression: Arc<ProgressionService>) -> Self {
        Self {
            profiles,
            progression,
        }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<Profile, ProfileError> {
        let mut profile = self.progression.get_or_create(&cmd.user_id).await?;
        profile.update_details(cmd.display_name, cmd.bio, cmd.avatar)?;
        self.profiles.update(&profile).await?;
        Ok(profile)
    }
}
