//! Current-user resolution for bearer-authenticated requests.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::TokenService;
use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Service for authenticating API requests via Bearer tokens.
///
/// A token is valid when its signature and expiry check out and its subject
/// names an existing user. There is no server-side revocation.
pub struct AuthService {
    repository: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    /// Creates a new authentication service.
    pub fn new(repository: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { repository, tokens }
    }

    /// Resolves the user a raw token belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if:
    /// - Token signature, algorithm or expiry is invalid
    /// - Token subject does not match any user
    ///
    /// Both cases produce the same error.
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve_current_user(&self, token: &str) -> Result<User, AppError> {
        let username = self.tokens.validate(token)?;

        self.repository
            .find_by_username(&username)
            .await?
            .ok_or_else(|| {
                tracing::debug!(%username, "Token subject has no account");
                AppError::invalid_credentials()
            })
    }

    /// Passes `user` through if the account is active.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Inactive`] for deactivated accounts.
    pub fn require_active(&self, user: User) -> Result<User, AppError> {
        if !user.active {
            return Err(AppError::inactive(
                "Inactive user",
                json!({ "username": user.username }),
            ));
        }

        Ok(user)
    }

    /// Resolves the user for `token` and requires an active account.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve_current_user`] and [`Self::require_active`].
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let user = self.resolve_current_user(token).await?;
        self.require_active(user)
    }
}
