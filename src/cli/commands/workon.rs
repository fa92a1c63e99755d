//! The `--workon` command.
//!
//! Resolves the task, prepares the database, and runs the session until the
//! user interrupts it. The task is stopped on every exit path once started.

use colored::Colorize;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::PomodoroError;
use crate::notify::Notifier;
use crate::pomodoro::{Acknowledger, CancellationToken, Session};
use crate::storage::schema;
use crate::tasks::TaskTracker;

/// Work on task `task_id`, starting at pomodoro `position`.
///
/// Returns normally when the session ends by interruption.
///
/// # Errors
///
/// Returns an error if the task cannot be resolved (before anything is
/// written), or if storage fails during the session.
pub fn workon<T, A, N>(
    tracker: &T,
    config: &Config,
    task_id: u32,
    position: u64,
    acknowledger: A,
    notifier: N,
    token: CancellationToken,
) -> Result<(), PomodoroError>
where
    T: TaskTracker,
    A: Acknowledger,
    N: Notifier,
{
    let task = tracker.get_task(task_id)?;

    if schema::initialize(&config.paths.database)? {
        info!(path = %config.paths.database.display(), "created pomodoro database");
    }

    println!(
        "Starting our pomodoro break period: {} on task: {}",
        position,
        task.description.cyan()
    );

    if let Err(e) = tracker.start(task_id) {
        warn!(task_id, error = %e, "could not start task");
    }

    let mut session = Session::new(
        &config.paths.database,
        config.schedule,
        task.uuid,
        position,
        acknowledger,
        notifier,
        token,
    );
    let result = session.run();

    println!("\n{}", "...wrapping up jobs and terminating.".dimmed());

    if let Err(e) = tracker.stop(task_id) {
        warn!(task_id, error = %e, "could not stop task");
    }

    match result {
        Err(e) if e.is_interrupted() => {
            info!(completed = session.counter().wrapping_sub(position), "session interrupted");
            Ok(())
        }
        other => other,
    }
}
