//! Handlers for link management endpoints (create, list, info, delete).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::link::{CreateLinkRequest, LinkResponse};
use crate::api::dto::pagination::PaginationParams;
use crate::api::extract::{CurrentUser, ValidatedJson, ValidatedQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for the current user.
///
/// # Endpoint
///
/// `POST /urls`
///
/// # Request Body
///
/// ```json
/// { "target_url": "https://www.google.com", "length": 6 }
/// ```
///
/// # Errors
///
/// - 400 if the user already shortened this URL
/// - 422 if the URL or length is invalid
/// - 503 if no free key could be generated
pub async fn create_link_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let link = state
        .link_service
        .create(payload.target_url, &user, payload.length)
        .await?;

    Ok((StatusCode::CREATED, Json(LinkResponse::created(link, &user))))
}

/// Lists the current user's links with click counts.
///
/// # Endpoint
///
/// `GET /urls/all?offset=0&limit=100`
///
/// # Errors
///
/// - 404 if the requested page is empty
/// - 422 if `limit` is outside 1..=100 or `offset` is negative
pub async fn list_links_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let (offset, limit) = params.offset_limit();

    let links = state
        .link_service
        .list_by_owner(&user, offset, limit)
        .await?;

    Ok(Json(
        links
            .into_iter()
            .map(|summary| LinkResponse::summary(summary, &user))
            .collect(),
    ))
}

/// Returns a link with its full click history.
///
/// # Endpoint
///
/// `GET /urls/info/{key}`
///
/// # Errors
///
/// Returns 404 if the key is unknown or belongs to another user.
pub async fn link_info_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(key): Path<String>,
) -> Result<Json<LinkResponse>, AppError> {
    let detail = state.link_service.get_detail(&key, user).await?;

    Ok(Json(detail.into()))
}

/// Deletes a link and its clicks.
///
/// # Endpoint
///
/// `DELETE /urls/{key}`
///
/// # Errors
///
/// Returns 404 if the key is unknown or belongs to another user.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(key): Path<String>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete(&key, &user).await?;

    Ok(StatusCode::NO_CONTENT)
}
