//! HTTP middleware for request processing.
//!
//! Provides request tracing. Authentication lives in the
//! [`crate::api::extract::CurrentUser`] extractor.

pub mod tracing;
