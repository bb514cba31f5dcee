//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Browser, ClickDetail, Link, LinkDetail, LinkSummary, User};
use crate::utils::key_generator::{DEFAULT_KEY_LENGTH, MAX_KEY_LENGTH, MIN_KEY_LENGTH};
use crate::utils::url_validator::MAX_TARGET_URL_LENGTH;

/// `validator` length bounds are `u64`; same value as `MAX_TARGET_URL_LENGTH`.
const MAX_TARGET_URL_LENGTH_U64: u64 = MAX_TARGET_URL_LENGTH as u64;

fn default_length() -> usize {
    DEFAULT_KEY_LENGTH
}

/// Request to shorten a URL.
///
/// ```json
/// { "target_url": "https://www.google.com", "length": 6 }
/// ```
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[validate(length(min = 1, max = MAX_TARGET_URL_LENGTH_U64))]
    pub target_url: String,

    /// Number of characters in the generated key.
    #[serde(default = "default_length")]
    #[validate(range(min = MIN_KEY_LENGTH, max = MAX_KEY_LENGTH))]
    pub length: usize,
}

/// Owner reference embedded in link responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkOwner {
    pub username: String,
    pub email: String,
}

impl From<&User> for LinkOwner {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// One click in a link's history.
#[derive(Debug, Serialize)]
pub struct ClickDetailResponse {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub browser: Browser,
}

impl From<ClickDetail> for ClickDetailResponse {
    fn from(click: ClickDetail) -> Self {
        Self {
            id: click.id,
            timestamp: click.clicked_at,
            browser: click.browser,
        }
    }
}

/// JSON representation of a link.
///
/// `clicks_detail` is only populated by the info endpoint; creation and
/// listing return it empty.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub url_key: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub total_clicks: i64,
    pub clicks_detail: Vec<ClickDetailResponse>,
    pub user: LinkOwner,
}

impl LinkResponse {
    /// Response for a freshly created link.
    pub fn created(link: Link, owner: &User) -> Self {
        Self::summary(
            LinkSummary {
                link,
                total_clicks: 0,
            },
            owner,
        )
    }

    /// Response for one entry of a listing.
    pub fn summary(summary: LinkSummary, owner: &User) -> Self {
        Self {
            url_key: summary.link.key,
            target_url: summary.link.target_url,
            created_at: summary.link.created_at,
            total_clicks: summary.total_clicks,
            clicks_detail: Vec::new(),
            user: owner.into(),
        }
    }
}

impl From<LinkDetail> for LinkResponse {
    fn from(detail: LinkDetail) -> Self {
        Self {
            url_key: detail.link.key,
            target_url: detail.link.target_url,
            created_at: detail.link.created_at,
            total_clicks: detail.total_clicks,
            clicks_detail: detail.clicks.into_iter().map(Into::into).collect(),
            user: (&detail.user).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_defaults_to_six() {
        let req: CreateLinkRequest =
            serde_json::from_str(r#"{"target_url": "https://www.google.com"}"#).unwrap();

        assert_eq!(req.length, 6);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_missing_target_url_fails() {
        assert!(serde_json::from_str::<CreateLinkRequest>(r#"{"length": 6}"#).is_err());
    }

    #[test]
    fn test_length_out_of_range() {
        for length in [0, 3, 33] {
            let req = CreateLinkRequest {
                target_url: "https://example.com".to_string(),
                length,
            };
            assert!(req.validate().is_err());
        }
    }

    #[test]
    fn test_created_response_shape() {
        let now = Utc::now();
        let user = User::new(
            1,
            "alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
            None,
            None,
            true,
            now,
            now,
        );
        let link = Link::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            1,
            now,
        );

        let json = serde_json::to_value(LinkResponse::created(link, &user)).unwrap();

        assert_eq!(json["url_key"], "abc123");
        assert_eq!(json["total_clicks"], 0);
        assert_eq!(json["clicks_detail"], serde_json::json!([]));
        assert_eq!(json["user"]["username"], "alice");
        assert!(json["user"].get("password_hash").is_none());
    }
}
