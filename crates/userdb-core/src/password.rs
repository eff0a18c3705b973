//! Password hashing
//!
//! Passwords are stored as Argon2id PHC strings with a per-user random salt.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use userdb_core_types::Sensitive;

use crate::errors::{Result, UserDbError};

/// Hash a plaintext password with Argon2id
///
/// # Errors
/// * `PasswordHash` - If Argon2 rejects the input
pub fn hash_password(password: &Sensitive<String>) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.expose().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserDbError::PasswordHash {
            message: e.to_string(),
        })
}

/// Check a plaintext password against a stored hash
///
/// A malformed stored hash never verifies.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verifies_and_hides_plaintext() {
        let password = Sensitive::new("bobpass".to_string());
        let hash = hash_password(&password).unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("bobpass"));
        assert!(verify_password("bobpass", &hash));
        assert!(!verify_password("bobpass2", &hash));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let password = Sensitive::new("same".to_string());
        let a = hash_password(&password).unwrap();
        let b = hash_password(&password).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("bobpass", "bobpass"));
        assert!(!verify_password("", ""));
    }
}
