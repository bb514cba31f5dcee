mod common;

use linkvault::domain::repositories::ClickRepository;
use linkvault::infrastructure::persistence::PgClickRepository;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

#[sqlx::test]
async fn test_record_click(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", "alice@example.com").await;
    common::create_test_link(&pool, "abc123", "https://example.com", alice).await;
    let repo = PgClickRepository::new(Arc::new(pool.clone()));

    let recorded = repo
        .record("abc123", Some("Mozilla/5.0".to_string()))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(recorded.target_url, "https://example.com");
    assert_eq!(recorded.click.link_key, "abc123");
    assert_eq!(recorded.click.user_agent.as_deref(), Some("Mozilla/5.0"));
    assert_eq!(common::count_clicks(&pool, "abc123").await, 1);
}

#[sqlx::test]
async fn test_record_click_without_user_agent(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", "alice@example.com").await;
    common::create_test_link(&pool, "abc123", "https://example.com", alice).await;
    let repo = PgClickRepository::new(Arc::new(pool));

    let recorded = repo.record("abc123", None).await.unwrap().unwrap();

    assert!(recorded.click.user_agent.is_none());
}

#[sqlx::test]
async fn test_record_unknown_key(pool: PgPool) {
    let repo = PgClickRepository::new(Arc::new(pool.clone()));

    let recorded = repo.record("missing", None).await.unwrap();

    assert!(recorded.is_none());
    assert_eq!(common::count_clicks(&pool, "missing").await, 0);
}

#[sqlx::test]
async fn test_list_for_link_oldest_first(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", "alice@example.com").await;
    common::create_test_link(&pool, "abc123", "https://example.com", alice).await;
    common::create_test_link(&pool, "xyz789", "https://other.com", alice).await;
    let repo = PgClickRepository::new(Arc::new(pool));

    repo.record("abc123", Some("first".to_string())).await.unwrap();
    repo.record("abc123", Some("second".to_string())).await.unwrap();
    repo.record("xyz789", None).await.unwrap();

    let clicks = repo.list_for_link("abc123").await.unwrap();

    assert_eq!(clicks.len(), 2);
    assert_eq!(clicks[0].user_agent.as_deref(), Some("first"));
    assert_eq!(clicks[1].user_agent.as_deref(), Some("second"));
    assert!(clicks[0].id < clicks[1].id);
}

#[sqlx::test]
async fn test_list_for_link_empty(pool: PgPool) {
    let repo = PgClickRepository::new(Arc::new(pool));

    let clicks = repo.list_for_link("missing").await.unwrap();

    assert!(clicks.is_empty());
}

#[sqlx::test]
async fn test_record_waits_for_concurrent_delete(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", "alice@example.com").await;
    common::create_test_link(&pool, "abc123", "https://example.com", alice).await;
    let repo = Arc::new(PgClickRepository::new(Arc::new(pool.clone())));

    let mut delete_tx = pool.begin().await.unwrap();
    sqlx::query("DELETE FROM links WHERE url_key = $1")
        .bind("abc123")
        .execute(&mut *delete_tx)
        .await
        .unwrap();

    // The row lock held by the delete blocks the redirect's FOR SHARE read.
    let pending = tokio::spawn({
        let repo = repo.clone();
        async move { repo.record("abc123", Some("Mozilla/5.0".to_string())).await }
    });

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!pending.is_finished());

    delete_tx.commit().await.unwrap();

    let recorded = pending.await.unwrap().unwrap();
    assert!(recorded.is_none());
    assert_eq!(common::count_clicks(&pool, "abc123").await, 0);
}

#[sqlx::test]
async fn test_delete_waits_for_in_flight_click(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", "alice@example.com").await;
    common::create_test_link(&pool, "abc123", "https://example.com", alice).await;

    // A click transaction that has locked the link but not yet committed.
    let mut click_tx = pool.begin().await.unwrap();
    sqlx::query("SELECT url_key FROM links WHERE url_key = $1 FOR SHARE")
        .bind("abc123")
        .execute(&mut *click_tx)
        .await
        .unwrap();
    sqlx::query("INSERT INTO clicks (url_key) VALUES ($1)")
        .bind("abc123")
        .execute(&mut *click_tx)
        .await
        .unwrap();

    let pending = tokio::spawn({
        let pool = pool.clone();
        async move {
            sqlx::query("DELETE FROM links WHERE url_key = $1")
                .bind("abc123")
                .execute(&pool)
                .await
                .map(|r| r.rows_affected())
        }
    });

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!pending.is_finished());

    click_tx.commit().await.unwrap();

    assert_eq!(pending.await.unwrap().unwrap(), 1);
    assert_eq!(common::count_clicks(&pool, "abc123").await, 0);
}
