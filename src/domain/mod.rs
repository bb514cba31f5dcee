//! Domain layer containing business entities and repository contracts.
//!
//! This module has no knowledge of HTTP or SQL. It defines what a user, a
//! link and a click are, and which storage operations the application layer
//! may rely on.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! # Redirect Flow
//!
//! 1. HTTP handler receives `GET /urls/{key}`
//! 2. [`crate::application::services::RedirectService`] asks the
//!    [`repositories::ClickRepository`] to resolve the key and record a click
//!    in a single transaction
//! 3. The stored target URL is returned and the handler issues a redirect

pub mod entities;
pub mod repositories;
