//! `SQLite` database connection.
//!
//! A connection is opened for the length of one interval and dropped when the
//! interval has been committed or rolled back.

use std::path::Path;

use rusqlite::{Connection, Transaction};

use crate::error::PomodoroError;

use super::schema;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at a specific path.
    ///
    /// The schema is not created here; see [`schema::initialize`].
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open_at(path: &Path) -> Result<Self, PomodoroError> {
        let conn = Connection::open(path).map_err(|e| {
            PomodoroError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        // Enable foreign keys
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| PomodoroError::Database(format!("Failed to enable foreign keys: {e}")))?;

        Ok(Self { conn })
    }

    /// Open an in-memory database with the schema applied (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema fails.
    pub fn open_in_memory() -> Result<Self, PomodoroError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            PomodoroError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| PomodoroError::Database(format!("Failed to enable foreign keys: {e}")))?;

        schema::create_tables(&conn)?;

        Ok(Self { conn })
    }

    /// Get a reference to the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Begin a transaction.
    ///
    /// The transaction rolls back when dropped unless committed.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started.
    pub fn transaction(&mut self) -> Result<Transaction<'_>, PomodoroError> {
        self.conn
            .transaction()
            .map_err(|e| PomodoroError::Database(format!("Failed to begin transaction: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        let fk: i64 = db
            .connection()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn test_open_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("table.db");

        schema::initialize(&db_path).unwrap();
        let db = Database::open_at(&db_path).unwrap();

        let tables: i64 = db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'pomodoro_token'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 1);
    }

    #[test]
    fn test_dropped_transaction_rolls_back() {
        let mut db = Database::open_in_memory().unwrap();

        {
            let tx = db.transaction().unwrap();
            tx.execute(
                "INSERT INTO pomodoro_token (time_started, time_ended, type) VALUES (1.0, 2.0, 'work')",
                [],
            )
            .unwrap();
        }

        let rows: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM pomodoro_token", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 0);
    }
}
