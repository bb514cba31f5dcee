//! Link creation, listing, analytics and deletion.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{ClickDetail, Link, LinkDetail, LinkSummary, NewLink, User};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;
use crate::utils::key_generator::{generate_key, is_reserved, validate_key_length};
use crate::utils::url_validator::validate_target_url;
use crate::utils::user_agent::parse_browser;

/// Service for creating and managing a user's short links.
///
/// Every operation except [`Self::get_by_key`] is scoped to an owner. Links
/// owned by someone else look exactly like links that do not exist.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    click_repository: Arc<dyn ClickRepository>,
    key_max_attempts: usize,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `key_max_attempts` bounds the number of keys tried per create request.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        click_repository: Arc<dyn ClickRepository>,
        key_max_attempts: usize,
    ) -> Self {
        Self {
            link_repository,
            click_repository,
            key_max_attempts,
        }
    }

    /// Creates a short link for `owner`.
    ///
    /// # Key Generation
    ///
    /// - Draws a random alphanumeric key of `key_length` characters
    /// - Skips reserved keys and keys already present in storage
    /// - A key taken by a concurrent insert counts as a collision
    /// - Gives up after `key_max_attempts` tries
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or key length is invalid.
    /// Returns [`AppError::Conflict`] if `owner` already shortened this URL.
    /// Returns [`AppError::Exhausted`] if no free key was found.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create(
        &self,
        target_url: String,
        owner: &User,
        key_length: usize,
    ) -> Result<Link, AppError> {
        validate_target_url(&target_url).map_err(|e| {
            AppError::bad_request(
                "Invalid target URL",
                json!({ "target_url": target_url, "reason": e.to_string() }),
            )
        })?;
        validate_key_length(key_length)?;

        if self
            .link_repository
            .find_by_target(&target_url, owner.id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "URL already exists in your database",
                json!({ "target_url": target_url }),
            ));
        }

        for attempt in 1..=self.key_max_attempts {
            let key = generate_key(key_length);

            if is_reserved(&key) || self.link_repository.key_exists(&key).await? {
                tracing::debug!(attempt, "Generated key collided, retrying");
                continue;
            }

            let new_link = NewLink {
                key,
                target_url: target_url.clone(),
                user_id: owner.id,
            };

            match self.link_repository.create(new_link).await? {
                Some(link) => {
                    tracing::info!(key = %link.key, user_id = owner.id, "Link created");
                    return Ok(link);
                }
                None => {
                    tracing::debug!(attempt, "Key taken by a concurrent insert, retrying");
                }
            }
        }

        tracing::warn!(
            key_length,
            attempts = self.key_max_attempts,
            "No free key found"
        );
        Err(AppError::exhausted(
            "Failed to generate a unique key",
            json!({ "length": key_length, "attempts": self.key_max_attempts }),
        ))
    }

    /// Lists the links of `owner` with their click counts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the page is empty.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_by_owner(
        &self,
        owner: &User,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<LinkSummary>, AppError> {
        let links = self
            .link_repository
            .list_by_owner(owner.id, offset, limit)
            .await?;

        if links.is_empty() {
            return Err(AppError::not_found(
                "No URLs found",
                json!({ "offset": offset, "limit": limit }),
            ));
        }

        Ok(links)
    }

    /// Retrieves a link by key regardless of owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this key.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_by_key(&self, key: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_key(key)
            .await?
            .ok_or_else(|| url_not_found(key))
    }

    /// Builds the analytics view of one of `requester`'s links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the key is unknown or owned by
    /// another user.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_detail(&self, key: &str, requester: User) -> Result<LinkDetail, AppError> {
        let link = self.owned_link(key, &requester).await?;

        let clicks: Vec<ClickDetail> = self
            .click_repository
            .list_for_link(key)
            .await?
            .into_iter()
            .map(|click| ClickDetail {
                id: click.id,
                clicked_at: click.clicked_at,
                browser: parse_browser(click.user_agent.as_deref()),
            })
            .collect();

        Ok(LinkDetail {
            link,
            total_clicks: clicks.len() as i64,
            clicks,
            user: requester,
        })
    }

    /// Deletes one of `owner`'s links together with its clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the key is unknown or owned by
    /// another user.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete(&self, key: &str, owner: &User) -> Result<(), AppError> {
        if !self.link_repository.delete(key, owner.id).await? {
            return Err(url_not_found(key));
        }

        tracing::info!(%key, user_id = owner.id, "Link deleted");
        Ok(())
    }

    async fn owned_link(&self, key: &str, owner: &User) -> Result<Link, AppError> {
        self.link_repository
            .find_by_key(key)
            .await?
            .filter(|link| link.is_owned_by(owner.id))
            .ok_or_else(|| url_not_found(key))
    }
}

fn url_not_found(key: &str) -> AppError {
    AppError::not_found("URL not found", json!({ "url_key": key }))
}
