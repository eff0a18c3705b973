//! Migration runner
//!
//! Applies migrations with checksums and idempotency

#![allow(clippy::result_large_err)]

use crate::errors::{checksum_mismatch, from_rusqlite, migration_error, Result};
use crate::migrations::checksums::compute_checksum;
use crate::migrations::embedded::get_migrations;
use rusqlite::{Connection, OptionalExtension};

/// Apply all pending migrations to the database in one transaction
pub fn apply_migrations(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction().map_err(from_rusqlite)?;
    apply_pending(&tx)?;
    tx.commit().map_err(from_rusqlite)?;

    Ok(())
}

/// Apply pending migrations on a connection that is already inside a transaction
pub fn apply_pending(conn: &Connection) -> Result<()> {
    create_schema_version_table(conn)?;

    for migration in get_migrations() {
        apply_migration(conn, migration.id, migration.sql)?;
    }

    Ok(())
}

/// Drop every table (including the migration ledger) and re-apply all migrations
///
/// Runs on the caller's connection so `initialize` can reset and seed
/// within a single session transaction.
pub fn reset_schema(conn: &Connection) -> Result<()> {
    let tables: Vec<String> = {
        let mut stmt = conn
            .prepare(
                "SELECT name FROM sqlite_master
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
                 ORDER BY name",
            )
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([], |row| row.get(0))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(from_rusqlite)?;
        rows
    };

    for table in &tables {
        tracing::debug!(table = table.as_str(), "dropping table");
        conn.execute_batch(&format!("DROP TABLE IF EXISTS \"{}\"", table))
            .map_err(from_rusqlite)?;
    }

    // AUTOINCREMENT counters survive DROP TABLE otherwise
    let has_sequence: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'sqlite_sequence'",
            [],
            |_| Ok(true),
        )
        .optional()
        .map_err(from_rusqlite)?
        .unwrap_or(false);
    if has_sequence {
        conn.execute("DELETE FROM sqlite_sequence", [])
            .map_err(from_rusqlite)?;
    }

    apply_pending(conn)
}

/// Create the schema_version table if it doesn't exist
fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY,
            migration_id TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL,
            checksum TEXT NOT NULL
        )",
        [],
    )
    .map_err(from_rusqlite)?;

    Ok(())
}

/// Apply a single migration if not already applied
fn apply_migration(conn: &Connection, migration_id: &str, sql: &str) -> Result<()> {
    let checksum = compute_checksum(sql);

    let recorded: Option<String> = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = ?",
            [migration_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    if let Some(recorded) = recorded {
        if recorded != checksum {
            return Err(checksum_mismatch(migration_id, &recorded, &checksum));
        }
        return Ok(());
    }

    conn.execute_batch(sql)
        .map_err(|e| migration_error(migration_id, &e.to_string()))?;

    let now = chrono::Utc::now().timestamp();
    conn.execute(
        "INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?, ?, ?)",
        rusqlite::params![migration_id, now, checksum],
    )
    .map_err(from_rusqlite)?;

    tracing::info!(migration_id, "applied migration");

    Ok(())
}
