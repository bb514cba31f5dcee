//! Handlers for registration, login and the current user's profile.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::user::{
    LoginForm, SignupRequest, TokenResponse, UpdateProfileRequest, UserResponse,
};
use crate::api::extract::{CurrentUser, ValidatedForm, ValidatedJson};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /signup`
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "email": "alice@example.com", "password": "nanobots" }
/// ```
///
/// # Errors
///
/// - 400 if the username or email is already registered
/// - 422 if the payload is malformed
pub async fn signup_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state
        .user_service
        .signup(payload.username, payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Exchanges form credentials for a bearer token.
///
/// # Endpoint
///
/// `POST /login` (`application/x-www-form-urlencoded`)
///
/// # Errors
///
/// Returns 401 for an unknown username or a wrong password alike.
pub async fn login_handler(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<LoginForm>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = state
        .user_service
        .login(&form.username, &form.password)
        .await?;

    Ok(Json(TokenResponse::bearer(token)))
}

/// `GET /users/me`
pub async fn me_handler(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}

/// Updates the current user's first and last name.
///
/// # Endpoint
///
/// `PATCH /users/me`
///
/// # Request Body
///
/// Both fields are optional; `null` clears a field.
///
/// ```json
/// { "first_name": "Ada", "last_name": null }
/// ```
pub async fn update_me_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .user_service
        .update_profile(user, payload.into())
        .await?;

    Ok(Json(user.into()))
}
