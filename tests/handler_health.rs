mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use sqlx::PgPool;
use linkvault::api::handlers::{health_handler, root_handler};

#[sqlx::test]
async fn test_health_endpoint_success(pool: PgPool) {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[sqlx::test]
async fn test_root_welcome(pool: PgPool) {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/", get(root_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["message"], "Welcome to URL Shortener");
}
