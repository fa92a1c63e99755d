//! Error type shared by every module.

use thiserror::Error;

/// Errors raised while running a pomodoro session.
#[derive(Error, Debug)]
pub enum PomodoroError {
    /// The user interrupted the session (Ctrl+C).
    #[error("Interrupted")]
    Interrupted,

    /// The requested task does not exist in the task tracker.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A storage operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// An external command exited unsuccessfully.
    #[error("Command failed: {0}")]
    Command(String),

    /// Output from the task tracker could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The interrupt handler could not be installed.
    #[error("Signal handler error: {0}")]
    Signal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PomodoroError {
    /// Build a `Command` error from a failed process' stderr.
    #[must_use]
    pub fn from_stderr(program: &str, stderr: &str) -> Self {
        let message = stderr.trim();
        if message.is_empty() {
            Self::Command(format!("{program} exited unsuccessfully"))
        } else {
            Self::Command(format!("{program}: {message}"))
        }
    }

    /// Whether this error is the user interrupting the session.
    #[must_use]
    pub const fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted)
    }
}

impl From<rusqlite::Error> for PomodoroError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}
