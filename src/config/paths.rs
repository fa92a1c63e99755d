//! Path resolution for pomodoro data files.
//!
//! All data lives next to TaskWarrior's own data in `~/.task/pomodoro/`:
//! - `table.db` - SQLite database of intervals and task assignments

use std::path::PathBuf;

use crate::error::PomodoroError;

/// Location of the pomodoro database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Database file: `~/.task/pomodoro/table.db`
    pub database: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, PomodoroError> {
        let home = std::env::var("HOME").map_err(|_| {
            PomodoroError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".task").join("pomodoro")))
    }

    /// Create paths under a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            database: root.join("table.db"),
        }
    }
}
