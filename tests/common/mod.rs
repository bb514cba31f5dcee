#![allow(dead_code)]

use jsonwebtoken::Algorithm;
use linkvault::application::services::TokenService;
use linkvault::infrastructure::persistence::{
    PgClickRepository, PgLinkRepository, PgUserRepository,
};
use linkvault::state::AppState;
use linkvault::utils::password::hash_password;
use sqlx::PgPool;
use std::sync::Arc;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const TEST_PASSWORD: &str = "correct-horse";

pub fn test_tokens() -> Arc<TokenService> {
    Arc::new(TokenService::new(TEST_SECRET, Algorithm::HS256, 30))
}

pub fn create_test_state(pool: PgPool) -> AppState {
    let pool = Arc::new(pool);

    AppState::from_repositories(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgLinkRepository::new(pool.clone())),
        Arc::new(PgClickRepository::new(pool)),
        test_tokens(),
        10,
    )
}

/// `Authorization` header value for a token signed with the test secret.
pub fn bearer_for(username: &str) -> String {
    format!("Bearer {}", test_tokens().issue(username, None).unwrap())
}

pub async fn create_test_user(pool: &PgPool, username: &str, email: &str) -> i64 {
    let password_hash = hash_password(TEST_PASSWORD).unwrap();

    sqlx::query_scalar(
        "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn deactivate_user(pool: &PgPool, username: &str) {
    sqlx::query("UPDATE users SET active = FALSE WHERE username = $1")
        .bind(username)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_test_link(pool: &PgPool, key: &str, url: &str, user_id: i64) {
    sqlx::query("INSERT INTO links (url_key, target_url, user_id) VALUES ($1, $2, $3)")
        .bind(key)
        .bind(url)
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_test_click(pool: &PgPool, key: &str, user_agent: Option<&str>) {
    sqlx::query("INSERT INTO clicks (url_key, user_agent) VALUES ($1, $2)")
        .bind(key)
        .bind(user_agent)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_clicks(pool: &PgPool, key: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM clicks WHERE url_key = $1")
        .bind(key)
        .fetch_one(pool)
        .await
        .unwrap()
}
