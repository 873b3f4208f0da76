//! Business logic services

pub mod chatbot;
pub mod community;
pub mod dashboard;
pub mod feedback;
pub mod location;
pub mod profile;

pub use chatbot::ChatbotService;
pub use community::CommunityService;
pub use dashboard::{DashboardService, HistoryOrigin, HistoryView};
pub use feedback::FeedbackService;
pub use location::{FixedPositionProvider, GeolocationProvider, LocationFlow};
pub use profile::ProfileService;
