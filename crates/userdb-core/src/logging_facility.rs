//! Structured logging facility
//!
//! - Single initialization point via `init(profile, default_filter)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`,
//!   `log_op_reported!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use userdb_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development, "info");
//! ```
//!
//! Events always go to stderr so command output on stdout stays clean.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
