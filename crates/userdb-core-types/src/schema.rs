//! Canonical schema constants for structured logging
//!
//! Event names are shared by the logging macros and the test capture layer.
//! Field keys listed here are the ones the capture layer lifts out of each
//! event; they must match the literal names the macros write.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
/// Operation finished with a reported outcome (not-found, conflict)
pub const EVENT_END_REPORTED: &str = "end_reported";
