//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short key to its target URL.
///
/// # Endpoint
///
/// `GET /urls/{key}`
///
/// # Request Flow
///
/// 1. Lock the link row and record a click with the raw `User-Agent`
/// 2. Commit
/// 3. Return 307 Temporary Redirect
///
/// # Errors
///
/// Returns 404 Not Found if the key doesn't exist; no click is recorded.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let target_url = state
        .redirect_service
        .resolve_and_record(&key, user_agent)
        .await?;

    let location = HeaderValue::try_from(target_url.as_str()).map_err(|_| {
        tracing::error!(%key, "Stored target URL is not a valid header value");
        AppError::internal("Stored target URL cannot be redirected to", json!({}))
    })?;

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]))
}
