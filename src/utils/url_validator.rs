//! Target URL validation.
//!
//! Target URLs are stored exactly as submitted: `(target_url, owner)` must be
//! unique byte for byte, so nothing here rewrites the input.

use url::Url;

/// Longest target URL accepted.
pub const MAX_TARGET_URL_LENGTH: usize = 2048;

/// Reasons a target URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL must be at most {MAX_TARGET_URL_LENGTH} characters")]
    TooLong,

    #[error("URL must not contain control characters")]
    ControlCharacter,
}

/// Checks that `input` is an absolute HTTP(S) URL with a host.
///
/// Rejects `javascript:`, `data:`, `file:` and other schemes a redirect
/// should never point at. Control characters are rejected before parsing:
/// the parser silently drops tabs and newlines, but the stored input is later
/// sent back verbatim in a `Location` header, which cannot carry them.
///
/// # Errors
///
/// Returns the first [`UrlValidationError`] that applies.
pub fn validate_target_url(input: &str) -> Result<(), UrlValidationError> {
    if input.len() > MAX_TARGET_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    if input.chars().any(char::is_control) {
        return Err(UrlValidationError::ControlCharacter);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(())
}
