//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkSummary, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Returns true if a link with this key exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn key_exists(&self, key: &str) -> Result<bool, AppError>;

    /// Inserts a new link.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if the link was inserted
    /// - `Ok(None)` if the key was taken in the meantime (caller should retry
    ///   with a fresh key)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the owner already shortened this target URL.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Option<Link>, AppError>;

    /// Finds a link by its short key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_key(&self, key: &str) -> Result<Option<Link>, AppError>;

    /// Finds the link a user created for a target URL, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_target(
        &self,
        target_url: &str,
        user_id: i64,
    ) -> Result<Option<Link>, AppError>;

    /// Lists a user's links with their click counts.
    ///
    /// Ordered by creation time, then key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_owner(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<LinkSummary>, AppError>;

    /// Deletes a link owned by `user_id`, cascading its clicks.
    ///
    /// Returns `Ok(false)` if no such link exists for this owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, key: &str, user_id: i64) -> Result<bool, AppError>;
}
