//! SQLite repository implementation
//!
//! Every function takes the session's connection, so reads and writes run
//! inside whatever transaction the caller holds.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use userdb_core::model::{PageRequest, User, UserSearch};

const USER_COLUMNS: &str = "id, username, email, password";

/// SQLite repository for users
pub struct SqliteUserRepo;

impl SqliteUserRepo {
    /// Look up the first user whose username matches exactly
    pub fn find_by_username(conn: &Connection, username: &str) -> Result<Option<User>> {
        conn.query_row(
            &format!(
                "SELECT {} FROM users WHERE username = ?1 ORDER BY id LIMIT 1",
                USER_COLUMNS
            ),
            [username],
            row_to_user,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// Every user in default order
    pub fn list_all(conn: &Connection) -> Result<Vec<User>> {
        query_users(
            conn,
            &format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS),
            Vec::new(),
        )
    }

    /// Substring search over username and/or email
    ///
    /// Both needles set means username-match OR email-match.
    pub fn search(conn: &Connection, search: &UserSearch) -> Result<Vec<User>> {
        let (clause, args) = match (&search.username, &search.email) {
            (Some(username), Some(email)) => (
                "WHERE username LIKE ?1 ESCAPE '\\' OR email LIKE ?2 ESCAPE '\\'",
                vec![like_pattern(username), like_pattern(email)],
            ),
            (Some(username), None) => (
                "WHERE username LIKE ?1 ESCAPE '\\'",
                vec![like_pattern(username)],
            ),
            (None, Some(email)) => (
                "WHERE email LIKE ?1 ESCAPE '\\'",
                vec![like_pattern(email)],
            ),
            (None, None) => ("", Vec::new()),
        };

        query_users(
            conn,
            &format!("SELECT {} FROM users {} ORDER BY id", USER_COLUMNS, clause),
            args,
        )
    }

    /// One limit/offset page in default order
    pub fn list_page(conn: &Connection, page: PageRequest) -> Result<Vec<User>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM users ORDER BY id LIMIT ?1 OFFSET ?2",
                USER_COLUMNS
            ))
            .map_err(from_rusqlite)?;

        let users = stmt
            .query_map(params![page.limit, page.offset], row_to_user)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(users)
    }

    /// Insert a user and return it with its database-assigned id
    ///
    /// A duplicate username or email fails with `AlreadyExists` and writes nothing.
    pub fn insert(
        conn: &Connection,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User> {
        conn.execute(
            "INSERT INTO users (username, email, password) VALUES (?1, ?2, ?3)",
            params![username, email, password_hash],
        )
        .map_err(from_rusqlite)?;

        Ok(User::new(
            conn.last_insert_rowid(),
            username.to_string(),
            email.to_string(),
            password_hash.to_string(),
        ))
    }

    /// Replace the email of the user with the given id
    ///
    /// Returns the number of rows touched (0 or 1).
    pub fn update_email(conn: &Connection, id: i64, new_email: &str) -> Result<usize> {
        conn.execute(
            "UPDATE users SET email = ?1 WHERE id = ?2",
            params![new_email, id],
        )
        .map_err(from_rusqlite)
    }

    /// Delete the user with the given id, returning the number of rows removed
    pub fn delete(conn: &Connection, id: i64) -> Result<usize> {
        conn.execute("DELETE FROM users WHERE id = ?1", [id])
            .map_err(from_rusqlite)
    }

    /// Total number of users
    pub fn count(conn: &Connection) -> Result<i64> {
        conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .map_err(from_rusqlite)
    }
}

fn query_users(conn: &Connection, sql: &str, args: Vec<String>) -> Result<Vec<User>> {
    let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;

    let users = stmt
        .query_map(params_from_iter(args.iter()), row_to_user)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    Ok(users)
}

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User::new(row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

/// Escape LIKE wildcards so the needle matches literally
pub fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn like_pattern(needle: &str) -> String {
    format!("%{}%", escape_like(needle))
}
