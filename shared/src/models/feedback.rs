//! Feedback form models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Bug,
    Feature,
    General,
}

impl fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackType::Bug => write!(f, "bug"),
            FeedbackType::Feature => write!(f, "feature"),
            FeedbackType::General => write!(f, "general"),
        }
    }
}

impl FromStr for FeedbackType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bug" => Ok(FeedbackType::Bug),
            "feature" => Ok(FeedbackType::Feature),
            "general" => Ok(FeedbackType::General),
            other => Err(format!("unknown feedback type '{}'", other)),
        }
    }
}

/// Feedback submission body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct FeedbackSubmission {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub feedback_type: FeedbackType,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
    /// 1-5 stars
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    pub show_in_community: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeedbackResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub posted_to_community: bool,
}
