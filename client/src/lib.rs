//! AgriSmart client
//!
//! Native client for the AgriSmart crop recommendation backend: location
//! detection, manual soil input, localized results and a bounded local
//! search history.

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod services;
pub mod storage;

pub use config::Config;
pub use error::{AppError, AppResult};
