//! Short key resolution with click recording.

use std::sync::Arc;

use serde_json::json;

use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// Resolves short keys for visitors and records one click per resolution.
pub struct RedirectService {
    click_repository: Arc<dyn ClickRepository>,
}

impl RedirectService {
    /// Creates a new redirect service.
    pub fn new(click_repository: Arc<dyn ClickRepository>) -> Self {
        Self { click_repository }
    }

    /// Returns the target URL for `key` after recording a click.
    ///
    /// `user_agent` is stored verbatim; `None` when the visitor sent no
    /// `User-Agent` header.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the key is unknown or the link was
    /// deleted concurrently. No click is recorded in that case.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve_and_record(
        &self,
        key: &str,
        user_agent: Option<String>,
    ) -> Result<String, AppError> {
        let recorded = self
            .click_repository
            .record(key, user_agent)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "url_key": key })))?;

        tracing::debug!(%key, click_id = recorded.click.id, "Click recorded");

        Ok(recorded.target_url)
    }
}
