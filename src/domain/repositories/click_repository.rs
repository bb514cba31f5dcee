//! Repository trait for click recording and history.

use crate::domain::entities::{Click, RecordedClick};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for click analytics.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Resolves a key and records a click for it atomically.
    ///
    /// The link row is locked against deletion while the click is written.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(RecordedClick))` with the stored target URL
    /// - `Ok(None)` if the key does not exist or the link vanished before the
    ///   click could be written; no click is stored in that case
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record(
        &self,
        key: &str,
        user_agent: Option<String>,
    ) -> Result<Option<RecordedClick>, AppError>;

    /// Lists all clicks of a link, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_for_link(&self, key: &str) -> Result<Vec<Click>, AppError>;
}
