use argon2::password_hash::{PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, PasswordHash};
use rand::rngs::OsRng;

use crate::errors::ServiceError;

/// PHC-formatted argon2 hash with a random salt.
pub fn hash(plain: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ServiceError::Db(format!("password hashing failed: {e}")))
}

/// False for a wrong password or an unreadable stored hash.
pub fn verify(plain: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default().verify_password(plain.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original() {
        let h = hash("contraseña-segura").unwrap();
        assert!(h.starts_with("$argon2"));
        assert!(verify("contraseña-segura", &h));
        assert!(!verify("otra-cosa", &h));
        assert!(!verify("contraseña-segura", "not-a-hash"));
    }
}
