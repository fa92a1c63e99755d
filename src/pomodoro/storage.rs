//! Interval and task assignment storage.
//!
//! Works on any connection, so the same calls run inside a transaction.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::interval::{IntervalRecord, RecordKind, TaskAssignment};
use crate::error::PomodoroError;

/// Append-only access to the interval tables.
pub struct IntervalStore<'c> {
    conn: &'c Connection,
}

impl<'c> IntervalStore<'c> {
    #[must_use]
    pub const fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Insert a completed interval and return its new ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert(&self, record: &mut IntervalRecord) -> Result<i64, PomodoroError> {
        self.conn
            .execute(
                "INSERT INTO pomodoro_token (time_started, time_ended, type) VALUES (?1, ?2, ?3)",
                params![
                    to_epoch_seconds(record.started_at),
                    to_epoch_seconds(record.ended_at),
                    record.kind.as_db_str(),
                ],
            )
            .map_err(|e| PomodoroError::Database(format!("Failed to insert interval: {e}")))?;

        let id = self.conn.last_insert_rowid();
        record.id = Some(id);
        Ok(id)
    }

    /// Link an interval to an external task.
    ///
    /// The task ID is stored as given; it is not checked against the tracker.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (e.g. the interval does not exist).
    pub fn assign_task(&self, interval_id: i64, task_uuid: &str) -> Result<i64, PomodoroError> {
        self.conn
            .execute(
                "INSERT INTO pomodoro_assigned_task (pomodoro_token_id, task_id) VALUES (?1, ?2)",
                params![interval_id, task_uuid],
            )
            .map_err(|e| PomodoroError::Database(format!("Failed to assign task: {e}")))?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Get an interval by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, id: i64) -> Result<Option<IntervalRecord>, PomodoroError> {
        self.conn
            .query_row(
                "SELECT id, time_started, time_ended, type FROM pomodoro_token WHERE id = ?1",
                [id],
                row_to_record,
            )
            .optional()
            .map_err(|e| PomodoroError::Database(format!("Failed to query interval: {e}")))
    }

    /// Get the task assignments of an interval.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn assignments_for(&self, interval_id: i64) -> Result<Vec<TaskAssignment>, PomodoroError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, pomodoro_token_id, task_id FROM pomodoro_assigned_task
                 WHERE pomodoro_token_id = ?1 ORDER BY id",
            )
            .map_err(|e| PomodoroError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([interval_id], |row| {
                Ok(TaskAssignment {
                    id: row.get(0)?,
                    interval_id: row.get(1)?,
                    task_uuid: row.get(2)?,
                })
            })
            .map_err(|e| PomodoroError::Database(format!("Failed to query assignments: {e}")))?;

        let mut assignments = Vec::new();
        for row in rows {
            assignments.push(row.map_err(|e| PomodoroError::Database(e.to_string()))?);
        }
        Ok(assignments)
    }

    /// Get every interval assigned to a task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_for_task(&self, task_uuid: &str) -> Result<Vec<IntervalRecord>, PomodoroError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT t.id, t.time_started, t.time_ended, t.type
                 FROM pomodoro_token t
                 JOIN pomodoro_assigned_task a ON a.pomodoro_token_id = t.id
                 WHERE a.task_id = ?1
                 ORDER BY t.id",
            )
            .map_err(|e| PomodoroError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([task_uuid], row_to_record)
            .map_err(|e| PomodoroError::Database(format!("Failed to query intervals: {e}")))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(|e| PomodoroError::Database(e.to_string()))?);
        }
        Ok(records)
    }

    /// Number of interval records.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_intervals(&self) -> Result<i64, PomodoroError> {
        self.count("SELECT COUNT(*) FROM pomodoro_token")
    }

    /// Number of task assignment records.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_assignments(&self) -> Result<i64, PomodoroError> {
        self.count("SELECT COUNT(*) FROM pomodoro_assigned_task")
    }

    fn count(&self, sql: &str) -> Result<i64, PomodoroError> {
        self.conn
            .query_row(sql, [], |row| row.get(0))
            .map_err(|e| PomodoroError::Database(format!("Failed to count rows: {e}")))
    }
}

/// Convert a database row to an `IntervalRecord`.
fn row_to_record(row: &Row<'_>) -> Result<IntervalRecord, rusqlite::Error> {
    let id: i64 = row.get(0)?;
    let started: f64 = row.get(1)?;
    let ended: f64 = row.get(2)?;
    let kind_str: String = row.get(3)?;

    let kind = RecordKind::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("unknown interval type '{kind_str}'").into(),
        )
    })?;

    Ok(IntervalRecord {
        id: Some(id),
        started_at: from_epoch_seconds(started),
        ended_at: from_epoch_seconds(ended),
        kind,
    })
}

/// Seconds since the epoch, with microsecond precision.
#[allow(clippy::cast_precision_loss)]
fn to_epoch_seconds(t: DateTime<Utc>) -> f64 {
    t.timestamp_micros() as f64 / 1_000_000.0
}

#[allow(clippy::cast_possible_truncation)]
fn from_epoch_seconds(secs: f64) -> DateTime<Utc> {
    DateTime::from_timestamp_micros((secs * 1_000_000.0).round() as i64).unwrap_or_default()
}
