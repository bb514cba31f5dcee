//! Short key generation.
//!
//! Keys are drawn uniformly from the 62-symbol alphanumeric alphabet. A key
//! is not unique by itself; the link service checks it against storage and
//! retries on collision.

use rand::{Rng, distr::Alphanumeric};
use serde_json::json;

use crate::error::AppError;

/// Key length used when the client does not ask for one.
pub const DEFAULT_KEY_LENGTH: usize = 6;

/// Shortest key a client may request.
pub const MIN_KEY_LENGTH: usize = 4;

/// Longest key a client may request.
pub const MAX_KEY_LENGTH: usize = 32;

/// Keys that would shadow fixed routes under `/urls/`.
const RESERVED_KEYS: &[&str] = &["all", "info"];

/// Generates a random alphanumeric key of exactly `length` characters.
///
/// # Examples
///
/// ```ignore
/// let key = generate_key(6);
/// assert_eq!(key.len(), 6);
/// assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_key(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Returns true if `key` must never be issued.
pub fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Validates a requested key length.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if `length` is outside
/// `MIN_KEY_LENGTH..=MAX_KEY_LENGTH`.
pub fn validate_key_length(length: usize) -> Result<(), AppError> {
    if !(MIN_KEY_LENGTH..=MAX_KEY_LENGTH).contains(&length) {
        return Err(AppError::bad_request(
            format!("Key length must be between {MIN_KEY_LENGTH} and {MAX_KEY_LENGTH}"),
            json!({ "length": length }),
        ));
    }

    Ok(())
}
