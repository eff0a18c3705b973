pub mod query;
pub mod user;

pub use query::{PageRequest, UserSearch, DEFAULT_PAGE_LIMIT, DEFAULT_PAGE_OFFSET};
pub use user::{NewUser, User};
