//! userdb Core - domain model and shared facilities
//!
//! This crate provides:
//! - The `User` model and query inputs (`UserSearch`, `PageRequest`)
//! - Argon2 password hashing
//! - The canonical error facility (`ExError`, `ExErrorKind`, `UserDbError`)
//! - The structured logging facility and its macros

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod password;

// Used by the logging macros through `$crate::schema`
pub use userdb_core_types::schema;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, Result, UserDbError};
pub use model::{NewUser, PageRequest, User, UserSearch};
