//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::user_service::UserService`] - Signup, login and profile updates
//! - [`services::auth_service::AuthService`] - Current-user resolution from bearer tokens
//! - [`services::token_service::TokenService`] - JWT issuance and validation
//! - [`services::link_service::LinkService`] - Short link creation, listing and analytics
//! - [`services::redirect_service::RedirectService`] - Key resolution with click recording

pub mod services;
