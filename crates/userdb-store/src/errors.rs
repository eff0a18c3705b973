//! Error handling for userdb-store
//!
//! Wraps userdb-core ExError with store-specific helpers

use rusqlite::ffi;
use userdb_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// True when SQLite rejected a write because of a UNIQUE or PRIMARY KEY constraint
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(ffi::Error { extended_code, .. }, _)
            if *extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                || *extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

/// Create a database error from rusqlite::Error
///
/// Uniqueness violations become `AlreadyExists`; everything else is
/// `Persistence`.
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    let kind = if is_unique_violation(&err) {
        ExErrorKind::AlreadyExists
    } else {
        ExErrorKind::Persistence
    };
    ExError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_unique_violation_maps_to_already_exists() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (name TEXT NOT NULL UNIQUE)")
            .unwrap();
        conn.execute("INSERT INTO t (name) VALUES ('a')", []).unwrap();

        let err = conn
            .execute("INSERT INTO t (name) VALUES ('a')", [])
            .unwrap_err();
        assert!(is_unique_violation(&err));
        assert_eq!(from_rusqlite(err).kind(), ExErrorKind::AlreadyExists);
    }

    #[test]
    fn test_not_null_violation_is_persistence() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (name TEXT NOT NULL UNIQUE)")
            .unwrap();

        let err = conn
            .execute("INSERT INTO t (name) VALUES (NULL)", [])
            .unwrap_err();
        assert!(!is_unique_violation(&err));
        assert_eq!(from_rusqlite(err).kind(), ExErrorKind::Persistence);
    }

    #[test]
    fn test_missing_table_is_persistence() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn.execute("DELETE FROM nope", []).unwrap_err();
        let ex = from_rusqlite(err);
        assert_eq!(ex.kind(), ExErrorKind::Persistence);
        assert!(ex.message().contains("nope"));
    }
}
