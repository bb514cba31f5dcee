//! PostgreSQL implementation of user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    first_name: Option<String>,
    last_name: Option<String>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User::new(
            r.id,
            r.username,
            r.email,
            r.password_hash,
            r.first_name,
            r.last_name,
            r.active,
            r.created_at,
            r.updated_at,
        )
    }
}

/// PostgreSQL repository for user accounts.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, first_name, last_name,
                   active, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, first_name, last_name,
                   active, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let result = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, first_name, last_name,
                      active, created_at, updated_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) if is_unique_violation_on(&e, "users_username_key") => Err(AppError::conflict(
                "Username already registered",
                json!({ "username": new_user.username }),
            )),
            Err(e) if is_unique_violation_on(&e, "users_email_key") => Err(AppError::conflict(
                "Email already registered",
                json!({ "email": new_user.email }),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_profile(&self, id: i64, patch: UserPatch) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET first_name = CASE WHEN $2 THEN $3 ELSE first_name END,
                last_name  = CASE WHEN $4 THEN $5 ELSE last_name END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, password_hash, first_name, last_name,
                      active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.first_name.is_some())
        .bind(patch.first_name.flatten())
        .bind(patch.last_name.is_some())
        .bind(patch.last_name.flatten())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(User::from)
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))
    }

    async fn set_active(&self, username: &str, active: bool) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE users SET active = $2, updated_at = NOW() WHERE username = $1",
        )
        .bind(username)
        .bind(active)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, first_name, last_name,
                   active, created_at, updated_at
            FROM users
            ORDER BY id
            OFFSET $1
            LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
