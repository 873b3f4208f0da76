//! Shared types and domain logic for the AgriSmart client
//!
//! This crate contains everything that does not touch the network or the
//! device directly, so it can be used by the native client and by the
//! browser front end (via WASM) alike.

pub mod context;
pub mod history;
pub mod i18n;
pub mod location;
pub mod models;
pub mod normalizer;
pub mod storage;
pub mod types;
pub mod validation;

pub use context::*;
pub use history::*;
pub use i18n::{resolve_crop_name, Localizer};
pub use location::*;
pub use models::*;
pub use normalizer::*;
pub use storage::*;
pub use types::*;
pub use validation::*;
