//! Migration framework
//!
//! Provides:
//! - Migration runner with checksums and idempotent application
//! - Schema reset used by `initialize`
//! - Embedded SQL migrations

mod checksums;
mod embedded;
mod runner;

pub use runner::{apply_migrations, apply_pending, reset_schema};
