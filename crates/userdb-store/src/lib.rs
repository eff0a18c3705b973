//! userdb Store - SQLite persistence for users
//!
//! Provides:
//! - Connection helpers and the lazily-opened `Database` handle
//! - Scoped `Session` transactions (rollback on drop)
//! - Embedded migrations with checksums
//! - `SqliteUserRepo` queries and seed data

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod seed;
pub mod session;

// Re-export key types
pub use errors::Result;
pub use repo::SqliteUserRepo;
pub use session::{Database, DbLocation, Session};
