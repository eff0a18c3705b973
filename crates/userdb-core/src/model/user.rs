use serde::Serialize;
use userdb_core_types::Sensitive;

/// A persisted user row
///
/// `id` is assigned by the database on insert. The password column only ever
/// holds an Argon2 PHC string and is skipped when the user is serialized.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Database-assigned primary key
    pub id: i64,

    /// Unique login name
    pub username: String,

    /// Unique email address
    pub email: String,

    /// Argon2 hash of the password
    #[serde(skip)]
    pub password_hash: Sensitive<String>,
}

impl User {
    pub fn new(id: i64, username: String, email: String, password_hash: String) -> Self {
        Self {
            id,
            username,
            email,
            password_hash: Sensitive::new(password_hash),
        }
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "User(id={}, username={}, email={})",
            self.id, self.username, self.email
        )
    }
}

/// Input for `create_user`, before the password is hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: Sensitive<String>,
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: Sensitive::new(password.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_omits_password() {
        let user = User::new(
            1,
            "bob".to_string(),
            "bob@mail.com".to_string(),
            "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        );
        assert_eq!(user.to_string(), "User(id=1, username=bob, email=bob@mail.com)");
        assert!(!format!("{:?}", user).contains("argon2id"));
    }

    #[test]
    fn test_serialize_skips_password_hash() {
        let user = User::new(7, "amy".to_string(), "amy@mail.com".to_string(), "h".to_string());
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 7, "username": "amy", "email": "amy@mail.com"})
        );
    }

    #[test]
    fn test_new_user_debug_redacts_password() {
        let new_user = NewUser::new("carol", "carol@mail.com", "topsecret");
        let debug_str = format!("{:?}", new_user);
        assert!(debug_str.contains("carol@mail.com"));
        assert!(!debug_str.contains("topsecret"));
    }
}
