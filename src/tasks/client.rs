use std::process::Command;

use tracing::debug;

use crate::error::PomodoroError;
use crate::tasks::types::Task;

/// Operations the session needs from the task tracker.
#[cfg_attr(test, mockall::automock)]
pub trait TaskTracker {
    /// Resolve a working-set id to its task.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no task has that id.
    fn get_task(&self, id: u32) -> Result<Task, PomodoroError>;

    /// Mark the task as started.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker rejects the command.
    fn start(&self, id: u32) -> Result<(), PomodoroError>;

    /// Mark the task as stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker rejects the command.
    fn stop(&self, id: u32) -> Result<(), PomodoroError>;
}

/// Talks to TaskWarrior through its `task` command.
#[derive(Clone)]
pub struct TaskWarriorClient {
    program: String,
    base_args: Vec<String>,
}

impl TaskWarriorClient {
    #[must_use]
    pub fn new() -> Self {
        Self::with_command("task", Vec::new())
    }

    /// Use a different executable, with arguments placed before every call
    /// (e.g. `rc.data.location=...` overrides, or a script run through `sh`).
    #[must_use]
    pub fn with_command(program: impl Into<String>, base_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            base_args,
        }
    }

    /// Run `task` with the given arguments and return stdout.
    fn execute(&self, args: &[&str]) -> Result<String, PomodoroError> {
        debug!(program = %self.program, ?args, "running task command");

        let output = Command::new(&self.program)
            .args(&self.base_args)
            .arg("rc.confirmation=off")
            .args(args)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PomodoroError::from_stderr(&self.program, &stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl TaskTracker for TaskWarriorClient {
    fn get_task(&self, id: u32) -> Result<Task, PomodoroError> {
        let id_arg = id.to_string();
        let stdout = self.execute(&["rc.verbose=nothing", &id_arg, "export"])?;

        parse_export(&stdout)?
            .into_iter()
            .next()
            .ok_or_else(|| PomodoroError::NotFound(format!("No task with id {id}")))
    }

    fn start(&self, id: u32) -> Result<(), PomodoroError> {
        self.execute(&[&id.to_string(), "start"]).map(|_| ())
    }

    fn stop(&self, id: u32) -> Result<(), PomodoroError> {
        self.execute(&[&id.to_string(), "stop"]).map(|_| ())
    }
}

impl Default for TaskWarriorClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `task export` output.
///
/// Accepts a JSON array (`json.array=on`, the default) or one JSON object per
/// line (`json.array=off`).
pub fn parse_export(stdout: &str) -> Result<Vec<Task>, PomodoroError> {
    let trimmed = stdout.trim();

    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(PomodoroError::Parse);
    }

    trimmed
        .lines()
        .map(|line| line.trim().trim_end_matches(','))
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str(line).map_err(PomodoroError::Parse))
        .collect()
}
