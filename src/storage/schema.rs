//! Schema creation.
//!
//! The schema is created once, when the database file does not exist yet.
//! An existing file is assumed to carry the right tables and is left alone.

use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::error::PomodoroError;

/// Create the database at `path` with both tables if it does not exist.
///
/// Returns `true` if the database was created, `false` if a file was
/// already there.
///
/// # Errors
///
/// Returns an error if the directory, file, or tables cannot be created.
pub fn initialize(path: &Path) -> Result<bool, PomodoroError> {
    if path.exists() {
        debug!(path = %path.display(), "database exists, skipping schema creation");
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PomodoroError::Config(format!(
                    "Failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
    }

    create_with(path, create_tables)?;

    debug!(path = %path.display(), "created database schema");
    Ok(true)
}

/// Open a new database at `path` and run `create` in one transaction.
///
/// The file is removed again if anything fails, so a later run starts over.
fn create_with(
    path: &Path,
    create: impl FnOnce(&Connection) -> Result<(), PomodoroError>,
) -> Result<(), PomodoroError> {
    let result = Connection::open(path)
        .map_err(|e| {
            PomodoroError::Database(format!("Failed to create database {}: {e}", path.display()))
        })
        .and_then(|mut conn| {
            let tx = conn.transaction()?;
            create(&*tx)?;
            tx.commit()?;
            Ok(())
        });

    if let Err(e) = result {
        if let Err(remove) = std::fs::remove_file(path) {
            debug!(path = %path.display(), error = %remove, "could not remove partial database");
        }
        return Err(e);
    }
    Ok(())
}

/// Create the interval and task assignment tables on an open connection.
///
/// # Errors
///
/// Returns an error if the statements fail.
pub fn create_tables(conn: &Connection) -> Result<(), PomodoroError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS pomodoro_token (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            time_started INTEGER,
            time_ended INTEGER,
            type TEXT
        );

        CREATE TABLE IF NOT EXISTS pomodoro_assigned_task (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            pomodoro_token_id INTEGER,
            task_id TEXT,
            FOREIGN KEY(pomodoro_token_id) REFERENCES pomodoro_token(id)
        );
        ",
    )
    .map_err(|e| PomodoroError::Database(format!("Schema creation failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn table_count(conn: &Connection) -> i64 {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
             AND name IN ('pomodoro_token', 'pomodoro_assigned_task')",
            [],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn test_initialize_creates_tables() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("table.db");

        assert!(initialize(&db_path).unwrap());
        assert!(db_path.exists());

        let conn = Connection::open(&db_path).unwrap();
        assert_eq!(table_count(&conn), 2);
    }

    #[test]
    fn test_initialize_creates_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join(".task").join("pomodoro").join("table.db");

        assert!(initialize(&db_path).unwrap());
        assert!(db_path.exists());
    }

    #[test]
    fn test_initialize_twice_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("table.db");

        assert!(initialize(&db_path).unwrap());

        {
            let conn = Connection::open(&db_path).unwrap();
            conn.execute(
                "INSERT INTO pomodoro_token (time_started, time_ended, type) VALUES (1.0, 2.0, 'work')",
                [],
            )
            .unwrap();
        }

        assert!(!initialize(&db_path).unwrap());

        let conn = Connection::open(&db_path).unwrap();
        assert_eq!(table_count(&conn), 2);
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM pomodoro_token", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_initialize_leaves_existing_file_alone() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("table.db");

        // An existing (empty) database file is not touched
        std::fs::File::create(&db_path).unwrap();
        assert!(!initialize(&db_path).unwrap());

        let conn = Connection::open(&db_path).unwrap();
        assert_eq!(table_count(&conn), 0);
    }

    #[test]
    fn test_failed_creation_leaves_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("table.db");

        let err = create_with(&db_path, |conn| {
            conn.execute_batch("CREATE TABLE pomodoro_token (id INTEGER PRIMARY KEY);")?;
            Err(PomodoroError::Database("disk full".to_string()))
        })
        .unwrap_err();

        assert!(matches!(err, PomodoroError::Database(_)));
        assert!(!db_path.exists());

        // The next run creates the schema from scratch
        assert!(initialize(&db_path).unwrap());
        let conn = Connection::open(&db_path).unwrap();
        assert_eq!(table_count(&conn), 2);
    }

    #[test]
    fn test_create_tables_enforces_foreign_key() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        create_tables(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO pomodoro_assigned_task (pomodoro_token_id, task_id) VALUES (42, 'abc')",
            [],
        );
        assert!(result.is_err());
    }
}
