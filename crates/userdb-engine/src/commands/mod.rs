//! Command orchestration layer.
//!
//! `user_command` is the dispatcher; `user_ops` holds one function per
//! operation, each owning exactly one session.

pub mod user_command;
pub mod user_ops;
