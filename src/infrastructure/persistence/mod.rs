//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with bound
//! parameters and `FromRow` row mapping.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Account storage and profile updates
//! - [`PgLinkRepository`] - Link storage, listing and deletion
//! - [`PgClickRepository`] - Transactional click recording and history

pub mod pg_click_repository;
pub mod pg_link_repository;
pub mod pg_user_repository;

pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_user_repository::PgUserRepository;
