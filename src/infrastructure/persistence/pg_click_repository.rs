//! PostgreSQL implementation of click repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, RecordedClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;
use crate::utils::db_error::is_foreign_key_violation;

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    url_key: String,
    clicked_at: DateTime<Utc>,
    user_agent: Option<String>,
}

impl From<ClickRow> for Click {
    fn from(r: ClickRow) -> Self {
        Click::new(r.id, r.url_key, r.clicked_at, r.user_agent)
    }
}

/// PostgreSQL repository for click recording and history.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record(
        &self,
        key: &str,
        user_agent: Option<String>,
    ) -> Result<Option<RecordedClick>, AppError> {
        let mut tx = self.pool.begin().await?;

        // FOR SHARE blocks a concurrent DELETE until the click is committed.
        let target_url = sqlx::query_scalar::<_, String>(
            "SELECT target_url FROM links WHERE url_key = $1 FOR SHARE",
        )
        .bind(key)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(target_url) = target_url else {
            return Ok(None);
        };

        let inserted = sqlx::query_as::<_, ClickRow>(
            r#"
            INSERT INTO clicks (url_key, user_agent)
            VALUES ($1, $2)
            RETURNING id, url_key, clicked_at, user_agent
            "#,
        )
        .bind(key)
        .bind(user_agent)
        .fetch_one(&mut *tx)
        .await;

        let row = match inserted {
            Ok(row) => row,
            Err(e) if is_foreign_key_violation(&e) => {
                tracing::debug!(%key, "Link vanished before click was written");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        tx.commit().await?;

        Ok(Some(RecordedClick {
            target_url,
            click: row.into(),
        }))
    }

    async fn list_for_link(&self, key: &str) -> Result<Vec<Click>, AppError> {
        let rows = sqlx::query_as::<_, ClickRow>(
            r#"
            SELECT id, url_key, clicked_at, user_agent
            FROM clicks
            WHERE url_key = $1
            ORDER BY clicked_at, id
            "#,
        )
        .bind(key)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Click::from).collect())
    }
}
