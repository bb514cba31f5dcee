//! Utility functions shared across layers.
//!
//! - [`password`] - Password hashing and verification (credential store)
//! - [`key_generator`] - Short key generation and length validation
//! - [`url_validator`] - Target URL validation
//! - [`user_agent`] - Best-effort browser classification
//! - [`db_error`] - Classification of database constraint errors

pub mod db_error;
pub mod key_generator;
pub mod password;
pub mod url_validator;
pub mod user_agent;
