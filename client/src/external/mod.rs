//! External API integrations

pub mod backend;
pub mod translation;

pub use backend::{BackendClient, LocationInsights};
pub use translation::TranslationClient;
