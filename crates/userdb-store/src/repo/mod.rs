//! Repository layer mapping `users` rows to the core `User` model

pub mod sqlite_repo;

pub use sqlite_repo::SqliteUserRepo;
