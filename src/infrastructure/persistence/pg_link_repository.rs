//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, LinkSummary, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on;

#[derive(sqlx::FromRow)]
struct LinkRow {
    url_key: String,
    target_url: String,
    user_id: i64,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(r.url_key, r.target_url, r.user_id, r.created_at)
    }
}

#[derive(sqlx::FromRow)]
struct LinkSummaryRow {
    #[sqlx(flatten)]
    link: LinkRow,
    total_clicks: i64,
}

/// PostgreSQL repository for link storage and retrieval.
///
/// The short key is the primary key, so a concurrent insert of the same key
/// is absorbed with `ON CONFLICT DO NOTHING` and reported as `None`.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn key_exists(&self, key: &str) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM links WHERE url_key = $1)")
                .bind(key)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn create(&self, new_link: NewLink) -> Result<Option<Link>, AppError> {
        let result = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (url_key, target_url, user_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (url_key) DO NOTHING
            RETURNING url_key, target_url, user_id, created_at
            "#,
        )
        .bind(&new_link.key)
        .bind(&new_link.target_url)
        .bind(new_link.user_id)
        .fetch_optional(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(row.map(Link::from)),
            Err(e) if is_unique_violation_on(&e, "links_target_url_user_id_key") => {
                Err(AppError::conflict(
                    "URL already exists in your database",
                    json!({ "target_url": new_link.target_url }),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            "SELECT url_key, target_url, user_id, created_at FROM links WHERE url_key = $1",
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn find_by_target(
        &self,
        target_url: &str,
        user_id: i64,
    ) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT url_key, target_url, user_id, created_at
            FROM links
            WHERE target_url = $1 AND user_id = $2
            "#,
        )
        .bind(target_url)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn list_by_owner(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<LinkSummary>, AppError> {
        let rows = sqlx::query_as::<_, LinkSummaryRow>(
            r#"
            SELECT l.url_key, l.target_url, l.user_id, l.created_at,
                   COUNT(c.id) AS total_clicks
            FROM links l
            LEFT JOIN clicks c ON c.url_key = l.url_key
            WHERE l.user_id = $1
            GROUP BY l.url_key
            ORDER BY l.created_at, l.url_key
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| LinkSummary {
                link: r.link.into(),
                total_clicks: r.total_clicks,
            })
            .collect())
    }

    async fn delete(&self, key: &str, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE url_key = $1 AND user_id = $2")
            .bind(key)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
