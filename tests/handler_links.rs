mod common;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use axum_test::TestServer;
use serde_json::{Value, json};
use sqlx::PgPool;
use linkvault::api::handlers::{
    create_link_handler, delete_link_handler, link_info_handler, list_links_handler,
};

fn make_server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/urls", post(create_link_handler))
        .route("/urls/all", get(list_links_handler))
        .route("/urls/info/{key}", get(link_info_handler))
        .route("/urls/{key}", axum::routing::delete(delete_link_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

// ─── CREATE ──────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_create_link_success(pool: PgPool) {
    common::create_test_user(&pool, "alice", "alice@example.com").await;
    let server = make_server(pool);

    let response = server
        .post("/urls")
        .add_header("Authorization", common::bearer_for("alice"))
        .json(&json!({ "target_url": "https://www.google.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    let key = body["url_key"].as_str().unwrap();
    assert_eq!(key.len(), 6);
    assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(body["target_url"], "https://www.google.com");
    assert_eq!(body["total_clicks"], 0);
    assert_eq!(body["clicks_detail"], json!([]));
    assert_eq!(
        body["user"],
        json!({ "username": "alice", "email": "alice@example.com" })
    );
}

#[sqlx::test]
async fn test_create_link_custom_length(pool: PgPool) {
    common::create_test_user(&pool, "alice", "alice@example.com").await;
    let server = make_server(pool);

    let response = server
        .post("/urls")
        .add_header("Authorization", common::bearer_for("alice"))
        .json(&json!({ "target_url": "https://www.google.com", "length": 12 }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["url_key"].as_str().unwrap().len(), 12);
}

#[sqlx::test]
async fn test_create_link_duplicate_target(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", "alice@example.com").await;
    common::create_test_link(&pool, "abc123", "https://www.google.com", alice).await;
    let server = make_server(pool);

    let response = server
        .post("/urls")
        .add_header("Authorization", common::bearer_for("alice"))
        .json(&json!({ "target_url": "https://www.google.com" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "URL already exists in your database");
}

#[sqlx::test]
async fn test_create_link_invalid_url(pool: PgPool) {
    common::create_test_user(&pool, "alice", "alice@example.com").await;
    let server = make_server(pool);

    for target in ["not a url", "ftp://example.com/file", "javascript:alert(1)"] {
        let response = server
            .post("/urls")
            .add_header("Authorization", common::bearer_for("alice"))
            .json(&json!({ "target_url": target }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[sqlx::test]
async fn test_create_link_rejects_control_characters(pool: PgPool) {
    common::create_test_user(&pool, "alice", "alice@example.com").await;
    let server = make_server(pool.clone());

    for target in ["https://example.com/a\nb", "https://exa\tmple.com/", "https://example.com/\r"] {
        let response = server
            .post("/urls")
            .add_header("Authorization", common::bearer_for("alice"))
            .json(&json!({ "target_url": target }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, 0);
}

#[sqlx::test]
async fn test_create_link_length_out_of_range(pool: PgPool) {
    common::create_test_user(&pool, "alice", "alice@example.com").await;
    let server = make_server(pool);

    let response = server
        .post("/urls")
        .add_header("Authorization", common::bearer_for("alice"))
        .json(&json!({ "target_url": "https://www.google.com", "length": 2 }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

// ─── LIST ────────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_list_links_only_own(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", "alice@example.com").await;
    let bob = common::create_test_user(&pool, "bob", "bob@example.com").await;
    common::create_test_link(&pool, "alice1", "https://one.example.com", alice).await;
    common::create_test_link(&pool, "alice2", "https://two.example.com", alice).await;
    common::create_test_link(&pool, "bobby1", "https://bob.example.com", bob).await;
    common::create_test_click(&pool, "alice1", None).await;
    let server = make_server(pool);

    let response = server
        .get("/urls/all")
        .add_header("Authorization", common::bearer_for("alice"))
        .await;

    response.assert_status_ok();
    let body: Vec<Value> = response.json();
    assert_eq!(body.len(), 2);
    assert!(body.iter().all(|l| l["user"]["username"] == "alice"));

    let first = body.iter().find(|l| l["url_key"] == "alice1").unwrap();
    assert_eq!(first["total_clicks"], 1);
}

#[sqlx::test]
async fn test_list_links_pagination(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", "alice@example.com").await;
    for i in 0..3 {
        common::create_test_link(
            &pool,
            &format!("key00{i}"),
            &format!("https://example.com/{i}"),
            alice,
        )
        .await;
    }
    let server = make_server(pool);

    let response = server
        .get("/urls/all")
        .add_query_param("offset", 1)
        .add_query_param("limit", 1)
        .add_header("Authorization", common::bearer_for("alice"))
        .await;

    response.assert_status_ok();
    let body: Vec<Value> = response.json();
    assert_eq!(body.len(), 1);
}

#[sqlx::test]
async fn test_list_links_empty_is_404(pool: PgPool) {
    common::create_test_user(&pool, "alice", "alice@example.com").await;
    let server = make_server(pool);

    let response = server
        .get("/urls/all")
        .add_header("Authorization", common::bearer_for("alice"))
        .await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "No URLs found");
}

#[sqlx::test]
async fn test_list_links_negative_offset(pool: PgPool) {
    common::create_test_user(&pool, "alice", "alice@example.com").await;
    let server = make_server(pool);

    let response = server
        .get("/urls/all")
        .add_query_param("offset", -1)
        .add_header("Authorization", common::bearer_for("alice"))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

// ─── INFO ────────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_link_info_with_clicks(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", "alice@example.com").await;
    common::create_test_link(&pool, "abc123", "https://www.google.com", alice).await;
    common::create_test_click(
        &pool,
        "abc123",
        Some("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"),
    )
    .await;
    common::create_test_click(&pool, "abc123", None).await;
    let server = make_server(pool);

    let response = server
        .get("/urls/info/abc123")
        .add_header("Authorization", common::bearer_for("alice"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["url_key"], "abc123");
    assert_eq!(body["total_clicks"], 2);

    let clicks = body["clicks_detail"].as_array().unwrap();
    assert_eq!(clicks.len(), 2);
    assert_eq!(clicks[0]["browser"]["name"], "Chrome");
    assert_eq!(clicks[1]["browser"]["name"], "Unknown");
    assert!(clicks[0]["timestamp"].is_string());
}

#[sqlx::test]
async fn test_link_info_foreign_link_is_404(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", "alice@example.com").await;
    common::create_test_user(&pool, "bob", "bob@example.com").await;
    common::create_test_link(&pool, "abc123", "https://www.google.com", alice).await;
    let server = make_server(pool);

    let response = server
        .get("/urls/info/abc123")
        .add_header("Authorization", common::bearer_for("bob"))
        .await;

    response.assert_status_not_found();
}

#[sqlx::test]
async fn test_link_info_unknown_key(pool: PgPool) {
    common::create_test_user(&pool, "alice", "alice@example.com").await;
    let server = make_server(pool);

    let response = server
        .get("/urls/info/missing")
        .add_header("Authorization", common::bearer_for("alice"))
        .await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "URL not found");
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_delete_link_success(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", "alice@example.com").await;
    common::create_test_link(&pool, "abc123", "https://www.google.com", alice).await;
    common::create_test_click(&pool, "abc123", None).await;
    let server = make_server(pool.clone());

    let response = server
        .delete("/urls/abc123")
        .add_header("Authorization", common::bearer_for("alice"))
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert_eq!(common::count_clicks(&pool, "abc123").await, 0);

    let again = server
        .delete("/urls/abc123")
        .add_header("Authorization", common::bearer_for("alice"))
        .await;
    again.assert_status_not_found();
}

#[sqlx::test]
async fn test_delete_foreign_link_keeps_it(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", "alice@example.com").await;
    common::create_test_user(&pool, "bob", "bob@example.com").await;
    common::create_test_link(&pool, "abc123", "https://www.google.com", alice).await;
    let server = make_server(pool.clone());

    let response = server
        .delete("/urls/abc123")
        .add_header("Authorization", common::bearer_for("bob"))
        .await;

    response.assert_status_not_found();

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE url_key = $1")
        .bind("abc123")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 1);
}
