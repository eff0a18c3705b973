use thiserror::Error;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used in CLI output, JSON logs and
/// tests. `NotFound` and `AlreadyExists` are the two kinds the command
/// dispatcher reports as outcomes instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Lookup / constraint
    NotFound,
    AlreadyExists,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    PasswordHash,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::PasswordHash => "ERR_PASSWORD_HASH",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional context (operation name,
/// username) for programmatic handling and readable messages.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    username: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            username: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the username the operation was acting on
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    /// True for the kinds the dispatcher turns into user-facing outcomes
    pub fn is_reportable(&self) -> bool {
        matches!(self.kind, ExErrorKind::NotFound | ExErrorKind::AlreadyExists)
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(username) = &self.username {
            write!(f, " (username: {})", username)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised by user operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UserDbError {
    /// No user row matched the exact username
    #[error("User not found: {username}")]
    UserNotFound { username: String },

    /// Insert or update collided with an existing username or email
    #[error("Username or email already taken: {username} / {email}")]
    UserAlreadyExists { username: String, email: String },

    /// Argon2 refused to hash the supplied password
    #[error("Password hashing failed: {message}")]
    PasswordHash { message: String },
}

impl From<UserDbError> for ExError {
    fn from(err: UserDbError) -> Self {
        match err {
            UserDbError::UserNotFound { username } => ExError::new(ExErrorKind::NotFound)
                .with_username(username)
                .with_message("User not found"),

            UserDbError::UserAlreadyExists { username, email } => {
                ExError::new(ExErrorKind::AlreadyExists)
                    .with_username(username)
                    .with_message(format!("Username or email already taken ({})", email))
            }

            UserDbError::PasswordHash { message } => {
                ExError::new(ExErrorKind::PasswordHash).with_message(message)
            }
        }
    }
}

/// Result type alias using UserDbError
pub type Result<T> = std::result::Result<T, UserDbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let kinds = [
            ExErrorKind::NotFound,
            ExErrorKind::AlreadyExists,
            ExErrorKind::Io,
            ExErrorKind::Serialization,
            ExErrorKind::Persistence,
            ExErrorKind::PasswordHash,
        ];
        let mut codes: Vec<_> = kinds.iter().map(|k| k.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
        assert!(codes.iter().all(|c| c.starts_with("ERR_")));
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::NotFound)
            .with_op("delete_user")
            .with_username("alice")
            .with_message("User not found");
        assert_eq!(
            err.to_string(),
            "[ERR_NOT_FOUND] in operation 'delete_user': User not found (username: alice)"
        );
    }

    #[test]
    fn test_display_without_context() {
        let err = ExError::new(ExErrorKind::Serialization);
        assert_eq!(err.to_string(), "[ERR_SERIALIZATION]");
    }

    #[test]
    fn test_source_is_exposed() {
        use std::error::Error;

        let inner = ExError::new(ExErrorKind::Persistence).with_message("disk I/O error");
        let outer = ExError::new(ExErrorKind::Io).with_source(inner);
        assert!(outer.source().is_some());
        assert_eq!(
            outer.source_error().map(|e| e.kind()),
            Some(ExErrorKind::Persistence)
        );
    }

    #[test]
    fn test_not_found_conversion() {
        let ex: ExError = UserDbError::UserNotFound {
            username: "ghost".to_string(),
        }
        .into();
        assert_eq!(ex.kind(), ExErrorKind::NotFound);
        assert_eq!(ex.username(), Some("ghost"));
        assert!(ex.is_reportable());
    }

    #[test]
    fn test_conflict_conversion() {
        let ex: ExError = UserDbError::UserAlreadyExists {
            username: "bob".to_string(),
            email: "bob@mail.com".to_string(),
        }
        .into();
        assert_eq!(ex.kind(), ExErrorKind::AlreadyExists);
        assert_eq!(ex.code(), "ERR_ALREADY_EXISTS");
        assert!(ex.is_reportable());
    }

    #[test]
    fn test_hash_failure_is_not_reportable() {
        let ex: ExError = UserDbError::PasswordHash {
            message: "salt too short".to_string(),
        }
        .into();
        assert_eq!(ex.kind(), ExErrorKind::PasswordHash);
        assert!(!ex.is_reportable());
    }
}
