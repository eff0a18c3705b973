//! One function per user operation.
//!
//! Each function opens exactly one session on the `Database` it is handed,
//! commits on success, and otherwise lets the session roll back. Not-found
//! and insert conflicts come back as `ExError`s of kind `NotFound` /
//! `AlreadyExists`; the dispatcher decides how to report them.

#![allow(clippy::result_large_err)]

use userdb_core::errors::{ExError, ExErrorKind, UserDbError};
use userdb_core::model::{NewUser, PageRequest, User, UserSearch};
use userdb_core::password::hash_password;
use userdb_store::errors::Result;
use userdb_store::migrations::reset_schema;
use userdb_store::seed::seed_default_user;
use userdb_store::{Database, SqliteUserRepo};

fn not_found(username: &str) -> ExError {
    UserDbError::UserNotFound {
        username: username.to_string(),
    }
    .into()
}

fn already_exists(username: &str, email: &str, cause: ExError) -> ExError {
    ExError::from(UserDbError::UserAlreadyExists {
        username: username.to_string(),
        email: email.to_string(),
    })
    .with_source(cause)
}

/// Drop and recreate the schema, then insert the seed user
pub fn initialize(db: &mut Database) -> Result<User> {
    let session = db.session()?;
    reset_schema(session.conn())?;
    let seed = seed_default_user(session.conn())?;
    session.commit()?;
    Ok(seed)
}

/// First user with exactly this username
///
/// # Errors
/// * `NotFound` - No such username
pub fn get_user(db: &mut Database, username: &str) -> Result<User> {
    let session = db.session()?;
    let user = SqliteUserRepo::find_by_username(session.conn(), username)?
        .ok_or_else(|| not_found(username))?;
    session.commit()?;
    Ok(user)
}

/// Every user, possibly none
pub fn get_all_users(db: &mut Database) -> Result<Vec<User>> {
    let session = db.session()?;
    let users = SqliteUserRepo::list_all(session.conn())?;
    session.commit()?;
    Ok(users)
}

/// Replace a user's email
///
/// # Errors
/// * `NotFound` - No such username
/// * `AlreadyExists` - Another user already has `new_email`; the session is
///   dropped uncommitted, so nothing is changed
pub fn change_email(db: &mut Database, username: &str, new_email: &str) -> Result<User> {
    let session = db.session()?;
    let mut user = SqliteUserRepo::find_by_username(session.conn(), username)?
        .ok_or_else(|| not_found(username))?;

    SqliteUserRepo::update_email(session.conn(), user.id, new_email)
        .map_err(|e| e.with_op("change_email").with_username(username))?;

    session.commit()?;
    user.email = new_email.to_string();
    Ok(user)
}

/// Insert a new user with a hashed password
///
/// # Errors
/// * `AlreadyExists` - Username or email taken; the transaction is rolled back
/// * `PasswordHash` - Argon2 rejected the password
pub fn create_user(db: &mut Database, new_user: &NewUser) -> Result<User> {
    let password_hash = hash_password(&new_user.password)?;

    let session = db.session()?;
    let inserted = SqliteUserRepo::insert(
        session.conn(),
        &new_user.username,
        &new_user.email,
        &password_hash,
    );

    match inserted {
        Ok(user) => {
            session.commit()?;
            Ok(user)
        }
        Err(e) if e.kind() == ExErrorKind::AlreadyExists => {
            session.rollback()?;
            Err(already_exists(&new_user.username, &new_user.email, e))
        }
        Err(e) => Err(e),
    }
}

/// Remove a user by exact username
///
/// # Errors
/// * `NotFound` - No such username
pub fn delete_user(db: &mut Database, username: &str) -> Result<()> {
    let session = db.session()?;
    let user = SqliteUserRepo::find_by_username(session.conn(), username)?
        .ok_or_else(|| not_found(username))?;
    SqliteUserRepo::delete(session.conn(), user.id)?;
    session.commit()?;
    Ok(())
}

/// Substring search; both needles combine with OR
pub fn find_user(db: &mut Database, search: &UserSearch) -> Result<Vec<User>> {
    let session = db.session()?;
    let users = SqliteUserRepo::search(session.conn(), search)?;
    session.commit()?;
    Ok(users)
}

/// One limit/offset page in default order
pub fn list_n_users(db: &mut Database, page: PageRequest) -> Result<Vec<User>> {
    let session = db.session()?;
    let users = SqliteUserRepo::list_page(session.conn(), page)?;
    session.commit()?;
    Ok(users)
}
