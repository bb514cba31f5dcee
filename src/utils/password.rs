//! Password hashing and verification.
//!
//! Uses Argon2id with a fresh random salt per hash. Hashes are stored in PHC
//! string format, so the parameters and salt travel with the hash.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde_json::json;

use crate::error::AppError;

/// Well-formed Argon2id hash that matches no password.
///
/// Verified against when a login names an unknown user, so that path costs
/// the same as a wrong password.
pub const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$RdescudvJCsgt3ub+b+dWRWJTmaaJObG";

/// Errors produced while hashing a password.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Password must not be empty")]
    Empty,

    #[error("Password hash error: {0}")]
    Hashing(String),
}

impl From<CredentialError> for AppError {
    fn from(e: CredentialError) -> Self {
        match e {
            CredentialError::Empty => {
                AppError::bad_request("Password must not be empty", json!({ "field": "password" }))
            }
            CredentialError::Hashing(reason) => {
                tracing::error!(%reason, "Password hashing failed");
                AppError::internal("Failed to hash password", json!({}))
            }
        }
    }
}

/// Hashes a password with Argon2id and a random salt.
///
/// Two calls with the same input produce different hashes that both verify.
///
/// # Errors
///
/// Returns [`CredentialError::Empty`] for an empty password and
/// [`CredentialError::Hashing`] if the hasher itself fails.
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    if password.is_empty() {
        return Err(CredentialError::Empty);
    }

    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CredentialError::Hashing(e.to_string()))
}

/// Checks `password` against a stored hash.
///
/// A malformed hash never matches; it does not produce an error.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        tracing::warn!("Stored password hash is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
