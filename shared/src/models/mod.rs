//! Domain models for the AgriSmart client

mod community;
mod feedback;
mod history;
mod profile;
mod recommendation;
mod tutorial;
mod user;
mod weather;

pub use community::*;
pub use feedback::*;
pub use history::*;
pub use profile::*;
pub use recommendation::*;
pub use tutorial::*;
pub use user::*;
pub use weather::*;
