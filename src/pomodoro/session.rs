//! The pomodoro session loop.
//!
//! Alternates work and break intervals forever. Each interval is one unit:
//! notify, wait for acknowledgment, wait out the interval, then record it and
//! its task assignment in a single transaction. An interrupt rolls the unit
//! back and ends the loop with [`PomodoroError::Interrupted`].

use std::path::PathBuf;

use tracing::info;

use crate::error::PomodoroError;
use crate::notify::Notifier;
use crate::storage::Database;

use super::cancel::CancellationToken;
use super::interval::{IntervalKind, Schedule};
use super::prompt::Acknowledger;
use super::storage::IntervalStore;
use super::timer;

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Between intervals
    Idle,
    /// Waiting for the user to confirm the next interval
    AwaitingAcknowledgment,
    /// Inside the timed wait
    RunningInterval,
    /// Writing the interval and its assignment
    Persisting,
}

/// A running pomodoro session bound to one task.
pub struct Session<A, N> {
    database: PathBuf,
    schedule: Schedule,
    task_uuid: String,
    counter: u64,
    state: SessionState,
    acknowledger: A,
    notifier: N,
    token: CancellationToken,
}

impl<A: Acknowledger, N: Notifier> Session<A, N> {
    /// Create a session starting at pomodoro `counter`.
    pub fn new(
        database: impl Into<PathBuf>,
        schedule: Schedule,
        task_uuid: impl Into<String>,
        counter: u64,
        acknowledger: A,
        notifier: N,
        token: CancellationToken,
    ) -> Self {
        Self {
            database: database.into(),
            schedule,
            task_uuid: task_uuid.into(),
            counter,
            state: SessionState::Idle,
            acknowledger,
            notifier,
            token,
        }
    }

    /// Completed work intervals, including the starting value.
    #[must_use]
    pub const fn counter(&self) -> u64 {
        self.counter
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Break that follows the most recent work interval.
    #[must_use]
    pub const fn next_break(&self) -> IntervalKind {
        IntervalKind::break_after(self.counter)
    }

    /// Alternate work and breaks until interrupted or an error occurs.
    ///
    /// # Errors
    ///
    /// Always returns an error: `Interrupted` on Ctrl+C, or the storage or
    /// I/O error that stopped the loop.
    pub fn run(&mut self) -> Result<(), PomodoroError> {
        loop {
            self.work()?;
            self.take_break()?;
        }
    }

    /// Run one work interval and count it.
    ///
    /// Returns the ID of the committed interval.
    ///
    /// # Errors
    ///
    /// Returns `Interrupted` if the interval was interrupted (nothing is
    /// persisted and the counter is unchanged).
    pub fn work(&mut self) -> Result<i64, PomodoroError> {
        let id = self.run_interval(IntervalKind::Work)?;
        self.counter = self.counter.wrapping_add(1);
        Ok(id)
    }

    /// Run the break chosen by the current counter.
    ///
    /// # Errors
    ///
    /// Returns `Interrupted` if the interval was interrupted.
    pub fn take_break(&mut self) -> Result<i64, PomodoroError> {
        self.run_interval(self.next_break())
    }

    /// Run one interval-and-commit unit.
    ///
    /// # Errors
    ///
    /// Returns `Interrupted` when the token was cancelled at any point in
    /// the unit, or a storage error.
    pub fn run_interval(&mut self, kind: IntervalKind) -> Result<i64, PomodoroError> {
        let result = self.run_unit(kind);
        self.state = SessionState::Idle;
        result
    }

    fn run_unit(&mut self, kind: IntervalKind) -> Result<i64, PomodoroError> {
        self.state = SessionState::AwaitingAcknowledgment;
        self.notifier.notify(kind);
        self.acknowledger.acknowledge(kind, &self.token)?;

        // The connection lives for this unit only.
        let mut db = Database::open_at(&self.database)?;

        self.state = SessionState::RunningInterval;
        let outcome = timer::run_interval(kind, self.schedule.duration(kind), &self.token);

        self.state = SessionState::Persisting;
        let tx = db.transaction()?;
        let mut record = outcome.record;
        let id = {
            let store = IntervalStore::new(&tx);
            let id = store.insert(&mut record)?;
            store.assign_task(id, &self.task_uuid)?;
            id
        };

        if self.token.is_cancelled() {
            tx.rollback()
                .map_err(|e| PomodoroError::Database(format!("Failed to roll back: {e}")))?;
            info!(%kind, "interval interrupted, rolled back");
            return Err(PomodoroError::Interrupted);
        }

        tx.commit()
            .map_err(|e| PomodoroError::Database(format!("Failed to commit interval: {e}")))?;

        info!(
            id,
            %kind,
            task = %self.task_uuid,
            seconds = record.elapsed().num_seconds(),
            "interval recorded"
        );
        Ok(id)
    }
}
