//! DTOs for account endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::entities::{User, UserPatch};

/// Longest accepted first or last name, in characters.
pub const MAX_NAME_LENGTH: usize = 50;

/// Usernames become token subjects, so they are kept to a plain alphabet.
static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap());

/// Registration payload.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    #[validate(regex(
        path = "*USERNAME_REGEX",
        message = "Username may only contain letters, digits, '_', '.' and '-'"
    ))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Login form, compatible with the OAuth2 password flow.
///
/// Extra OAuth2 fields such as `grant_type` or `scope` are accepted and
/// ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Issued access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Partial profile update.
///
/// A missing field is left unchanged; an explicit `null` clears it.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "present")]
    pub first_name: Option<Option<String>>,

    #[serde(default, deserialize_with = "present")]
    pub last_name: Option<Option<String>>,
}

/// Marks a field as present even when its value is `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl Validate for UpdateProfileRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for (field, value) in [("first_name", &self.first_name), ("last_name", &self.last_name)] {
            if let Some(Some(name)) = value
                && name.chars().count() > MAX_NAME_LENGTH
            {
                let mut error = ValidationError::new("length");
                error.message = Some(Cow::Borrowed("Name must be at most 50 characters"));
                error.add_param(Cow::Borrowed("max"), &MAX_NAME_LENGTH);
                errors.add(field, error);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<UpdateProfileRequest> for UserPatch {
    fn from(req: UpdateProfileRequest) -> Self {
        UserPatch {
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}

/// Public view of an account. The password hash is never serialized.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            active: user.active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
