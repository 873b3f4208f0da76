//! Error handling for the AgriSmart client
//!
//! Every failure maps to a stable code and a dictionary key, so the farmer
//! always sees localized, recoverable guidance.

use shared::{LocationError, Localizer, SessionError, StorageError};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Non-success HTTP status from the backend. `message` is the `detail`
    /// field when the body carried one.
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    // Validation errors block submission before any request is sent
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    /// Message used when the backend gives no `detail`
    pub fn from_status(status: u16, detail: Option<String>) -> Self {
        AppError::Backend {
            status,
            message: detail.unwrap_or_else(|| format!("HTTP error! status: {}", status)),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Backend { .. } => "BACKEND_ERROR",
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::InvalidResponse(_) => "INVALID_RESPONSE",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Location(_) => "LOCATION_ERROR",
            AppError::Session(_) => "SESSION_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    pub fn message_key(&self) -> &'static str {
        match self {
            AppError::Backend { .. } => "error.server",
            AppError::Network(_) => "error.network",
            AppError::InvalidResponse(_) => "error.payload",
            AppError::Validation(_) => "manual.invalid",
            AppError::Location(err) => err.message_key(),
            AppError::Session(err) => err.message_key(),
            AppError::Storage(_) => "error.storage",
            AppError::Configuration(_) => "error.config",
        }
    }

    /// Text shown to the farmer
    pub fn user_message(&self, localizer: &Localizer) -> String {
        match self {
            AppError::Backend { message, .. } => message.clone(),
            AppError::Location(err) => err.guidance(localizer),
            _ => localizer.t(self.message_key()).to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
        fields.sort_unstable();
        if fields.is_empty() {
            AppError::Validation(errors.to_string())
        } else {
            AppError::Validation(format!("invalid fields: {}", fields.join(", ")))
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::InvalidResponse(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
