pub mod render;
pub mod users;
