//! Account registration, login and profile management.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::TokenService;
use crate::domain::entities::{NewUser, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::{DUMMY_PASSWORD_HASH, hash_password, verify_password};

/// Service for user accounts.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(repository: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { repository, tokens }
    }

    /// Registers a new account.
    ///
    /// Username and email are checked up front so the client gets a precise
    /// message; the storage constraints still catch concurrent signups.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username or email is taken.
    /// Returns [`AppError::Validation`] if the password is empty.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn signup(
        &self,
        username: String,
        email: String,
        password: &str,
    ) -> Result<User, AppError> {
        if self.repository.find_by_username(&username).await?.is_some() {
            return Err(AppError::conflict(
                "Username already registered",
                json!({ "username": username }),
            ));
        }

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(
                "Email already registered",
                json!({ "email": email }),
            ));
        }

        let password_hash = hash_password(password)?;

        let user = self
            .repository
            .create(NewUser {
                username,
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Verifies credentials and issues an access token.
    ///
    /// Unknown usernames and wrong passwords fail identically. Inactive users
    /// can still log in; the active check happens on protected routes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on bad credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        let user = self.repository.find_by_username(username).await?;

        // Unknown usernames still pay for one Argon2 verification.
        let hash = user
            .as_ref()
            .map_or(DUMMY_PASSWORD_HASH, |u| u.password_hash.as_str());
        let verified = verify_password(password, hash);

        let Some(user) = user.filter(|_| verified) else {
            tracing::warn!(%username, "Rejected login attempt");
            return Err(AppError::unauthorized(
                "Incorrect username or password",
                json!({}),
            ));
        };

        let token = self.tokens.issue(&user.username, None)?;
        tracing::info!(user_id = user.id, "User logged in");

        Ok(token)
    }

    /// Applies a profile patch to `user`.
    ///
    /// An empty patch returns the user unchanged without touching storage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user disappeared.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_profile(&self, user: User, patch: UserPatch) -> Result<User, AppError> {
        if patch.is_empty() {
            return Ok(user);
        }

        let updated = self.repository.update_profile(user.id, patch).await?;
        tracing::info!(user_id = updated.id, "Profile updated");

        Ok(updated)
    }

    /// Checks that user storage is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the database cannot be queried.
    pub async fn check_storage(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
