//! Farmer profile models

use serde::{Deserialize, Serialize};

use crate::types::Language;

/// Farmer profile, keyed by the anonymous user id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Profile {
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub farm_size: String,
    /// small, medium, large or organic
    #[serde(default)]
    pub farm_type: String,
    #[serde(default)]
    pub preferred_language: Language,
}

impl Profile {
    pub fn empty(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfileResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub profile: Option<Profile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SaveProfileResponse {
    #[serde(default)]
    pub success: bool,
}
