//! Command dispatcher.
//!
//! `apply_user_command` runs one operation and converts the two reported
//! failure kinds into outcomes:
//! - `NotFound` from a username lookup becomes `UserCommandResult::NotFound`
//! - `AlreadyExists` from `create_user` becomes `UserCommandResult::Conflict`
//!
//! Every other error propagates, including a uniqueness violation raised by
//! `change_email`. Each call logs one `start` event and one
//! of `end` / `end_reported` / `end_error`.

#![allow(clippy::result_large_err)]

use serde::Serialize;
use userdb_core::errors::{ExError, ExErrorKind};
use userdb_core::model::{NewUser, PageRequest, User, UserSearch};
use userdb_core::{log_op_end, log_op_error, log_op_reported, log_op_start};
use userdb_store::errors::Result;
use userdb_store::Database;

use crate::commands::user_ops;

/// Operation names, also used as the `op` field in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserOp {
    Initialize,
    GetUser,
    GetAllUsers,
    ChangeEmail,
    CreateUser,
    DeleteUser,
    FindUser,
    ListNUsers,
}

impl UserOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserOp::Initialize => "initialize",
            UserOp::GetUser => "get_user",
            UserOp::GetAllUsers => "get_all_users",
            UserOp::ChangeEmail => "change_email",
            UserOp::CreateUser => "create_user",
            UserOp::DeleteUser => "delete_user",
            UserOp::FindUser => "find_user",
            UserOp::ListNUsers => "list_n_users",
        }
    }

    /// Whether `err` is reported as an outcome for this op
    fn reports(&self, err: &ExError) -> bool {
        if !err.is_reportable() {
            return false;
        }
        match err.kind() {
            ExErrorKind::NotFound => matches!(
                self,
                UserOp::GetUser | UserOp::ChangeEmail | UserOp::DeleteUser
            ),
            ExErrorKind::AlreadyExists => matches!(self, UserOp::CreateUser),
            _ => false,
        }
    }
}

impl std::fmt::Display for UserOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Commands accepted by the dispatcher
#[derive(Debug, Clone)]
pub enum UserCommand {
    /// Destroy and recreate the schema, then insert the seed user
    Initialize,
    GetUser {
        username: String,
    },
    GetAllUsers,
    ChangeEmail {
        username: String,
        new_email: String,
    },
    CreateUser {
        new_user: NewUser,
    },
    DeleteUser {
        username: String,
    },
    FindUser {
        search: UserSearch,
    },
    ListNUsers {
        page: PageRequest,
    },
}

impl UserCommand {
    pub fn op(&self) -> UserOp {
        match self {
            UserCommand::Initialize => UserOp::Initialize,
            UserCommand::GetUser { .. } => UserOp::GetUser,
            UserCommand::GetAllUsers => UserOp::GetAllUsers,
            UserCommand::ChangeEmail { .. } => UserOp::ChangeEmail,
            UserCommand::CreateUser { .. } => UserOp::CreateUser,
            UserCommand::DeleteUser { .. } => UserOp::DeleteUser,
            UserCommand::FindUser { .. } => UserOp::FindUser,
            UserCommand::ListNUsers { .. } => UserOp::ListNUsers,
        }
    }

    /// Username the command acts on, if it names one
    pub fn username(&self) -> Option<&str> {
        match self {
            UserCommand::GetUser { username }
            | UserCommand::ChangeEmail { username, .. }
            | UserCommand::DeleteUser { username } => Some(username),
            UserCommand::CreateUser { new_user } => Some(&new_user.username),
            _ => None,
        }
    }

    /// Email the command would insert, if any
    fn email(&self) -> Option<&str> {
        match self {
            UserCommand::CreateUser { new_user } => Some(&new_user.email),
            _ => None,
        }
    }
}

/// Outcome of a dispatched command
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UserCommandResult {
    Initialized { seed: User },
    Found { user: User },
    AllUsers { users: Vec<User> },
    EmailChanged { user: User },
    Created { user: User },
    Deleted { username: String },
    Matches { users: Vec<User> },
    Page { page: PageRequest, users: Vec<User> },
    /// Username lookup found no row; nothing was changed
    NotFound { op: UserOp, username: String },
    /// Insert hit a taken username or email; the transaction was rolled back
    Conflict { username: String, email: String },
}

impl UserCommandResult {
    /// Users carried by a listing outcome
    pub fn users(&self) -> Option<&[User]> {
        match self {
            UserCommandResult::AllUsers { users }
            | UserCommandResult::Matches { users }
            | UserCommandResult::Page { users, .. } => Some(users),
            _ => None,
        }
    }
}

/// Apply a command against the database
///
/// # Errors
/// Any failure other than a reported not-found / conflict, e.g. an
/// unreadable database file or a failed migration.
pub fn apply_user_command(cmd: UserCommand, db: &mut Database) -> Result<UserCommandResult> {
    let op = cmd.op();
    log_op_start!(op.as_str(), username = cmd.username());
    let start = std::time::Instant::now();

    match execute(&cmd, db) {
        Ok(result) => {
            log_op_end!(
                op.as_str(),
                duration_ms = start.elapsed().as_millis() as u64,
                username = cmd.username(),
                user_count = result.users().map(|u| u.len() as u64)
            );
            Ok(result)
        }
        Err(e) if op.reports(&e) => {
            log_op_reported!(
                op.as_str(),
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                username = cmd.username()
            );
            Ok(reported_outcome(&cmd, op, e))
        }
        Err(e) => {
            log_op_error!(
                op.as_str(),
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                username = cmd.username()
            );
            Err(e)
        }
    }
}

fn reported_outcome(cmd: &UserCommand, op: UserOp, err: ExError) -> UserCommandResult {
    let username = cmd
        .username()
        .or(err.username())
        .unwrap_or_default()
        .to_string();

    match err.kind() {
        ExErrorKind::AlreadyExists => UserCommandResult::Conflict {
            username,
            email: cmd.email().unwrap_or_default().to_string(),
        },
        _ => UserCommandResult::NotFound { op, username },
    }
}

fn execute(cmd: &UserCommand, db: &mut Database) -> Result<UserCommandResult> {
    let result = match cmd {
        UserCommand::Initialize => UserCommandResult::Initialized {
            seed: user_ops::initialize(db)?,
        },
        UserCommand::GetUser { username } => UserCommandResult::Found {
            user: user_ops::get_user(db, username)?,
        },
        UserCommand::GetAllUsers => UserCommandResult::AllUsers {
            users: user_ops::get_all_users(db)?,
        },
        UserCommand::ChangeEmail {
            username,
            new_email,
        } => UserCommandResult::EmailChanged {
            user: user_ops::change_email(db, username, new_email)?,
        },
        UserCommand::CreateUser { new_user } => UserCommandResult::Created {
            user: user_ops::create_user(db, new_user)?,
        },
        UserCommand::DeleteUser { username } => {
            user_ops::delete_user(db, username)?;
            UserCommandResult::Deleted {
                username: username.clone(),
            }
        }
        UserCommand::FindUser { search } => UserCommandResult::Matches {
            users: user_ops::find_user(db, search)?,
        },
        UserCommand::ListNUsers { page } => UserCommandResult::Page {
            page: *page,
            users: user_ops::list_n_users(db, *page)?,
        },
    };

    Ok(result)
}
