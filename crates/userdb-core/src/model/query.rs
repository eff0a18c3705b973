use serde::Serialize;

/// Page size used when `list_n_users` is called without a limit
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
/// Offset used when `list_n_users` is called without an offset
pub const DEFAULT_PAGE_OFFSET: u32 = 0;

/// Substring filter for `find_user`
///
/// When both fields are set a user matches if its username contains
/// `username` OR its email contains `email`. With neither set every user
/// matches. Empty needles count as "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserSearch {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl UserSearch {
    pub fn new(username: Option<String>, email: Option<String>) -> Self {
        Self {
            username: username.filter(|s| !s.is_empty()),
            email: email.filter(|s| !s.is_empty()),
        }
    }

    pub fn by_username(needle: impl Into<String>) -> Self {
        Self::new(Some(needle.into()), None)
    }

    pub fn by_email(needle: impl Into<String>) -> Self {
        Self::new(None, Some(needle.into()))
    }

    /// No filter given: the search degenerates to "all users"
    pub fn is_unfiltered(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }
}

/// Limit/offset window over the default row order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub limit: u32,
    pub offset: u32,
}

impl PageRequest {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: DEFAULT_PAGE_OFFSET,
        }
    }
}
