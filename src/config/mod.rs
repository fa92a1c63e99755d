//! Configuration management.
//!
//! Paths are derived from the home directory once at startup and passed
//! explicitly to storage and the session loop.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::Config;
