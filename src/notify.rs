//! Audible cue played before each interval.

use std::process::Command;

use tracing::debug;

use crate::pomodoro::IntervalKind;

/// Something that gets the user's attention before an interval starts.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// Fire the cue. Failures are logged and otherwise ignored.
    fn notify(&self, kind: IntervalKind);
}

/// Speaks a phrase with the macOS `say` command.
#[derive(Debug, Clone)]
pub struct SayNotifier {
    voice: String,
    phrase: String,
}

impl SayNotifier {
    #[must_use]
    pub fn new(voice: impl Into<String>, phrase: impl Into<String>) -> Self {
        Self {
            voice: voice.into(),
            phrase: phrase.into(),
        }
    }
}

impl Default for SayNotifier {
    fn default() -> Self {
        Self::new("Cellos", "bom bom boom")
    }
}

impl Notifier for SayNotifier {
    fn notify(&self, kind: IntervalKind) {
        let result = Command::new("say")
            .arg("-v")
            .arg(&self.voice)
            .arg(&self.phrase)
            .status();

        match result {
            Ok(status) if status.success() => {
                debug!(%kind, "played notification");
            }
            Ok(status) => debug!(%kind, %status, "say exited unsuccessfully"),
            Err(e) => debug!(%kind, error = %e, "could not run say"),
        }
    }
}
