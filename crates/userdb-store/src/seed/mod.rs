//! Seed data inserted by `initialize`

#![allow(clippy::result_large_err)]

use crate::errors::Result;
use crate::repo::SqliteUserRepo;
use rusqlite::Connection;
use userdb_core::model::{NewUser, User};
use userdb_core::password::hash_password;
use userdb_core::ExError;

pub const SEED_USERNAME: &str = "bob";
pub const SEED_EMAIL: &str = "bob@mail.com";
pub const SEED_PASSWORD: &str = "bobpass";

/// The user every freshly initialized database starts with
pub fn default_seed_user() -> NewUser {
    NewUser::new(SEED_USERNAME, SEED_EMAIL, SEED_PASSWORD)
}

/// Insert the default seed user
pub fn seed_default_user(conn: &Connection) -> Result<User> {
    let seed = default_seed_user();
    let password_hash = hash_password(&seed.password).map_err(ExError::from)?;
    SqliteUserRepo::insert(conn, &seed.username, &seed.email, &password_hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::apply_migrations;
    use userdb_core::password::verify_password;

    #[test]
    fn test_seed_default_user() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();

        let bob = seed_default_user(&conn).unwrap();

        assert_eq!(bob.id, 1);
        assert_eq!(bob.username, SEED_USERNAME);
        assert_eq!(bob.email, SEED_EMAIL);
        assert!(verify_password(SEED_PASSWORD, bob.password_hash.expose()));
    }

    #[test]
    fn test_seed_twice_conflicts() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();

        seed_default_user(&conn).unwrap();
        let err = seed_default_user(&conn).unwrap_err();
        assert_eq!(err.kind(), userdb_core::ExErrorKind::AlreadyExists);
    }
}
