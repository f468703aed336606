//! Argon2 password hashing.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// One-way credential hashing. Raw passwords are consumed at registration
/// and only the PHC-format hash is ever stored.
#[derive(Debug, Clone, Default)]
pub struct PasswordEncoder;

impl PasswordEncoder {
    pub fn new() -> Self {
        Self
    }

    pub fn hash(&self, raw: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default().hash_password(raw.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    pub fn verify(&self, raw: &str, hash: &str) -> bool {
        PasswordHash::new(hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(raw.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_never_the_plaintext_and_verifies() {
        let encoder = PasswordEncoder::new();

        let hash = encoder.hash("pw").unwrap();

        assert_ne!(hash, "pw");
        assert!(encoder.verify("pw", &hash));
        assert!(!encoder.verify("wrong", &hash));
    }

    #[test]
    fn hashing_twice_salts_differently() {
        let encoder = PasswordEncoder::new();

        let first = encoder.hash("pw").unwrap();
        let second = encoder.hash("pw").unwrap();

        assert_ne!(first, second);
    }
}
