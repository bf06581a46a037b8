// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
//!
//! The stored secret is always a salted scrypt PHC string; the plaintext is
//! never persisted. Verification goes through `PasswordVerifier`, which
//! re-derives under the stored salt and compares digests in constant time.
use scrypt::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Scrypt,
};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Password complexity requirements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordRequirements {
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
    pub require_special: bool,
}

impl Default for PasswordRequirements {
    fn default() -> Self {
        // The product never enforced complexity, only a floor on length.
        Self {
            min_length: 6,
            require_uppercase: false,
            require_lowercase: false,
            require_digit: false,
            require_special: false,
        }
    }
}

/// Hash a password using scrypt with a fresh random salt.
///
/// A failure here is an internal error; callers must not surface it as
/// "invalid credentials".
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt.hash_password(plain.as_bytes(), &salt)?.to_string();
    Ok(hash)
}

/// Verify a password against a stored hash.
///
/// `Ok(false)` is a mismatch. A stored hash that is not a valid PHC string
/// is an internal fault (the store only ever persists PHC strings) and is
/// surfaced as an error, never as a mismatch.
pub fn verify_password(hash: &str, plain: &str) -> anyhow::Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| anyhow::anyhow!("stored hash is not a valid PHC string: {e}"))?;
    Ok(Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok())
}

/// Hash a password and zeroize the plaintext buffer afterwards.
pub fn hash_password_secure(plain: &mut String) -> anyhow::Result<String> {
    let hash = hash_password(plain)?;
    plain.zeroize();
    Ok(hash)
}
