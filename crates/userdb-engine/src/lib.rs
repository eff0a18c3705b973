//! userdb Engine - command dispatch
//!
//! Turns a `UserCommand` into one scoped database session and a
//! `UserCommandResult` the CLI can render.

pub mod commands;

pub use commands::user_command::{apply_user_command, UserCommand, UserCommandResult, UserOp};
