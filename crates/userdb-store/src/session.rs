//! Lazily-opened database handle and per-command sessions
//!
//! `Database` does not touch the disk until the first `session()` call. Each
//! command then runs inside exactly one `Session`, which is a transaction
//! that must be committed explicitly; dropping it rolls back.

#![allow(clippy::result_large_err)]

use crate::db;
use crate::errors::{from_rusqlite, Result};
use crate::migrations::apply_migrations;
use rusqlite::{Connection, Transaction};
use std::path::{Path, PathBuf};

/// Where the database lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    Memory,
}

/// Lazily-initialized handle to the users database
pub struct Database {
    location: DbLocation,
    conn: Option<Connection>,
}

impl Database {
    /// Handle for a file database; nothing is opened yet
    pub fn open_lazy(path: impl Into<PathBuf>) -> Self {
        Self {
            location: DbLocation::File(path.into()),
            conn: None,
        }
    }

    /// Handle for a private in-memory database (for testing)
    ///
    /// The connection is kept for the lifetime of the handle, so data
    /// survives across sessions.
    pub fn in_memory() -> Self {
        Self {
            location: DbLocation::Memory,
            conn: None,
        }
    }

    pub fn location(&self) -> &DbLocation {
        &self.location
    }

    /// Path of a file database, `None` for in-memory
    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            DbLocation::File(path) => Some(path),
            DbLocation::Memory => None,
        }
    }

    /// Whether the underlying connection has been opened yet
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Begin a session, opening and migrating the database on first use
    pub fn session(&mut self) -> Result<Session<'_>> {
        let conn = self.connection()?;
        let tx = conn.transaction().map_err(from_rusqlite)?;
        tracing::trace!("session opened");
        Ok(Session { tx })
    }

    fn connection(&mut self) -> Result<&mut Connection> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => {
                let mut conn = match &self.location {
                    DbLocation::File(path) => db::open(path)?,
                    DbLocation::Memory => db::open_in_memory()?,
                };
                db::configure(&conn)?;
                apply_migrations(&mut conn)?;
                tracing::debug!(location = ?self.location, "database opened");
                conn
            }
        };
        Ok(self.conn.insert(conn))
    }
}

/// A scoped unit of work against the database
///
/// Ends with `commit` or `rollback`; if neither is called the transaction is
/// rolled back when the session is dropped, including on `?` early returns.
pub struct Session<'db> {
    tx: Transaction<'db>,
}

impl Session<'_> {
    /// Connection to issue repository calls against
    pub fn conn(&self) -> &Connection {
        &self.tx
    }

    /// Persist everything done in this session
    pub fn commit(self) -> Result<()> {
        self.tx.commit().map_err(from_rusqlite)?;
        tracing::trace!("session committed");
        Ok(())
    }

    /// Discard everything done in this session
    pub fn rollback(self) -> Result<()> {
        self.tx.rollback().map_err(from_rusqlite)?;
        tracing::trace!("session rolled back");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::SqliteUserRepo;
    use tempfile::TempDir;

    #[test]
    fn test_open_lazy_does_not_touch_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lazy").join("users.db");

        let mut database = Database::open_lazy(&path);
        assert!(!database.is_open());
        assert!(!path.exists());

        database.session().unwrap().commit().unwrap();
        assert!(database.is_open());
        assert!(path.exists());
    }

    #[test]
    fn test_committed_session_is_visible() {
        let mut database = Database::in_memory();

        let session = database.session().unwrap();
        SqliteUserRepo::insert(session.conn(), "amy", "amy@mail.com", "h").unwrap();
        session.commit().unwrap();

        let session = database.session().unwrap();
        assert_eq!(SqliteUserRepo::count(session.conn()).unwrap(), 1);
    }

    #[test]
    fn test_dropped_session_rolls_back() {
        let mut database = Database::in_memory();

        {
            let session = database.session().unwrap();
            SqliteUserRepo::insert(session.conn(), "amy", "amy@mail.com", "h").unwrap();
        }

        let session = database.session().unwrap();
        assert_eq!(SqliteUserRepo::count(session.conn()).unwrap(), 0);
    }

    #[test]
    fn test_explicit_rollback() {
        let mut database = Database::in_memory();

        let session = database.session().unwrap();
        SqliteUserRepo::insert(session.conn(), "amy", "amy@mail.com", "h").unwrap();
        session.rollback().unwrap();

        let session = database.session().unwrap();
        assert!(SqliteUserRepo::find_by_username(session.conn(), "amy")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_location_accessors() {
        let database = Database::open_lazy("/tmp/x/users.db");
        assert_eq!(database.path(), Some(Path::new("/tmp/x/users.db")));
        assert_eq!(Database::in_memory().path(), None);
        assert_eq!(Database::in_memory().location(), &DbLocation::Memory);
    }
}
