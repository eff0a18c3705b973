//! Canonical logging macros
//!
//! Every dispatcher operation emits exactly one start event and exactly one
//! of end / end_reported / end_error.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use userdb_core::log_op_start;
/// log_op_start!("get_user");
/// log_op_start!("get_user", username = "bob");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use userdb_core::log_op_end;
/// log_op_end!("get_all_users", duration_ms = 3, user_count = 2);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation that ended with a reported outcome
///
/// Used for not-found and insert conflicts: the command succeeded from the
/// process point of view, but did not change anything. Logged at info level
/// since the user already sees the outcome as a message.
///
/// # Example
///
/// ```
/// # use userdb_core::log_op_reported;
/// # use userdb_core::errors::UserDbError;
/// let err = UserDbError::UserNotFound { username: "ghost".to_string() };
/// log_op_reported!("delete_user", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_reported {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_REPORTED,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_REPORTED,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            $($field)*
        );
    }};
}

/// Log an operation error
///
/// # Example
///
/// ```
/// # use userdb_core::log_op_error;
/// # use userdb_core::errors::{ExError, ExErrorKind};
/// let err = ExError::new(ExErrorKind::Persistence).with_message("disk full");
/// log_op_error!("create_user", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            error = %ex_err,
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            error = %ex_err,
            $($field)*
        );
    }};
}
