//! Handler for the API root.

use axum::Json;
use serde_json::{Value, json};

/// `GET /`
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "Welcome to URL Shortener" }))
}
