//! Request extractors that report failures as [`AppError`].
//!
//! axum's stock rejections answer with plain-text bodies; these wrappers keep
//! every client-facing error in the JSON error envelope.

use axum::{
    Form, Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use axum_auth::AuthBearer;
use serde::de::DeserializeOwned;
use serde_json::json;
use validator::Validate;

use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;

/// JSON body that has been deserialized and validated.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::bad_request(
                    "Invalid request body",
                    json!({ "reason": rejection.body_text() }),
                )
            })?;

        value.validate()?;
        Ok(Self(value))
    }
}

/// URL-encoded form body that has been deserialized and validated.
#[derive(Debug)]
pub struct ValidatedForm<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::bad_request(
                    "Invalid form body",
                    json!({ "reason": rejection.body_text() }),
                )
            })?;

        value.validate()?;
        Ok(Self(value))
    }
}

/// Query string that has been deserialized and validated.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::bad_request(
                    "Invalid query parameters",
                    json!({ "reason": rejection.body_text() }),
                )
            })?;

        value.validate()?;
        Ok(Self(value))
    }
}

/// The active user behind the request's bearer token.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// Rejects with `401 Unauthorized` if the header is missing or malformed,
/// the token is invalid or expired, or its subject has no account. Rejects
/// with `400 Bad Request` if the account is deactivated.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthBearer(token) = AuthBearer::from_request_parts(parts, &())
            .await
            .map_err(|_| AppError::invalid_credentials())?;

        let user = state.auth_service.authenticate(&token).await?;

        Ok(Self(user))
    }
}
