//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    AuthService, LinkService, RedirectService, TokenService, UserService,
};
use crate::config::Config;
use crate::domain::repositories::{ClickRepository, LinkRepository, UserRepository};
use crate::infrastructure::persistence::{PgClickRepository, PgLinkRepository, PgUserRepository};

/// Services shared by all requests.
///
/// Cloning is cheap; every field is an `Arc`. Nothing in here is mutated
/// after startup.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub auth_service: Arc<AuthService>,
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
}

impl AppState {
    /// Wires the PostgreSQL repositories into the services.
    ///
    /// # Errors
    ///
    /// Returns an error if the token configuration is unusable.
    pub fn new(pool: Arc<PgPool>, config: &Config) -> anyhow::Result<Self> {
        let tokens = Arc::new(TokenService::from_config(config)?);

        Ok(Self::from_repositories(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgLinkRepository::new(pool.clone())),
            Arc::new(PgClickRepository::new(pool)),
            tokens,
            config.key_max_attempts,
        ))
    }

    /// Builds the state from arbitrary repository implementations.
    pub fn from_repositories(
        users: Arc<dyn UserRepository>,
        links: Arc<dyn LinkRepository>,
        clicks: Arc<dyn ClickRepository>,
        tokens: Arc<TokenService>,
        key_max_attempts: usize,
    ) -> Self {
        Self {
            user_service: Arc::new(UserService::new(users.clone(), tokens.clone())),
            auth_service: Arc::new(AuthService::new(users, tokens)),
            link_service: Arc::new(LinkService::new(links, clicks.clone(), key_max_attempts)),
            redirect_service: Arc::new(RedirectService::new(clicks)),
        }
    }
}
