//! Runtime configuration, resolved once at startup.

use crate::error::PomodoroError;
use crate::pomodoro::Schedule;

use super::Paths;

/// Everything the session needs to know about its environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where the database lives.
    pub paths: Paths,
    /// Interval durations.
    pub schedule: Schedule,
}

impl Config {
    /// Resolve configuration from the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn load() -> Result<Self, PomodoroError> {
        Ok(Self {
            paths: Paths::new()?,
            schedule: Schedule::default(),
        })
    }

    /// Build configuration from explicit parts.
    #[must_use]
    pub const fn new(paths: Paths, schedule: Schedule) -> Self {
        Self { paths, schedule }
    }
}
