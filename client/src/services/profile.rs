//! Farmer profile service

use shared::Profile;

use crate::error::{AppError, AppResult};
use crate::external::BackendClient;

#[derive(Clone)]
pub struct ProfileService {
    backend: BackendClient,
}

impl ProfileService {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    /// Saved profile, or an empty one for a user that has none yet
    pub async fn load(&self, user_id: &str) -> AppResult<Profile> {
        let response = self.backend.get_profile(user_id).await?;
        match response.profile {
            Some(profile) if response.success => Ok(profile),
            _ => {
                tracing::debug!("No saved profile for {}", user_id);
                Ok(Profile::empty(user_id))
            }
        }
    }

    pub async fn save(&self, profile: &Profile) -> AppResult<()> {
        let response = self.backend.save_profile(profile).await?;
        if !response.success {
            return Err(AppError::InvalidResponse("profile was not saved".into()));
        }
        Ok(())
    }
}
