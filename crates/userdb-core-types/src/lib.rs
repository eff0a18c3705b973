//! Core types shared across userdb crates
//!
//! - **Correlation**: `InvocationId` tying every log line of one CLI run together
//! - **Sensitive data**: `Sensitive<T>` marker for automatic redaction
//! - **Schema constants**: canonical field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::InvocationId;
pub use sensitive::Sensitive;
