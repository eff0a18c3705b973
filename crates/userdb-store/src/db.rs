//! Database connection management
//!
//! Provides utilities for opening and configuring SQLite connections

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, io_error, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path, creating its parent directory
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_error("create_db_dir", e))?;
    }
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Configure a connection with the settings every session relies on
pub fn configure(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(from_rusqlite)?;

    // In-memory databases report "memory" and ignore the request
    let _mode: String = conn
        .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
        .map_err(from_rusqlite)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("users.db");

        let conn = open(&path).unwrap();
        configure(&conn).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_file_database_uses_wal() {
        let temp_dir = TempDir::new().unwrap();
        let conn = open(temp_dir.path().join("users.db")).unwrap();
        configure(&conn).unwrap();

        let mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_configure_in_memory() {
        let conn = open_in_memory().unwrap();
        assert!(configure(&conn).is_ok());
    }
}
