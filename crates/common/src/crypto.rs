//! Password hashing shared across Tollgate crates
//!
//! Passwords are stored as Argon2id PHC strings with a random 16-byte salt.
//! Verification parses the stored PHC string, so parameters travel with the hash.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};

use crate::{Error, Result};

/// Hashes and verifies user passwords.
///
/// Hashes are one-way; callers compare through [`PasswordEncoder::matches`]
/// and never log either side.
pub trait PasswordEncoder: Send + Sync {
    /// Produce a salted hash of `raw_password`
    fn encode(&self, raw_password: &str) -> Result<String>;

    /// Check `raw_password` against a stored hash
    fn matches(&self, raw_password: &str, stored_hash: &str) -> bool;
}

/// Argon2id password encoder with default parameters
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordEncoder;

impl Argon2PasswordEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordEncoder for Argon2PasswordEncoder {
    fn encode(&self, raw_password: &str) -> Result<String> {
        let mut salt_bytes = [0u8; 16];
        getrandom::getrandom(&mut salt_bytes)
            .map_err(|e| Error::Internal(format!("Failed to generate salt: {}", e)))?;
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| Error::Internal(format!("Failed to encode salt: {}", e)))?;

        let phc = Argon2::default()
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?
            .to_string();

        Ok(phc)
    }

    fn matches(&self, raw_password: &str, stored_hash: &str) -> bool {
        match PasswordHash::new(stored_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(raw_password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}
