//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

use super::click::ClickDetail;
use super::user::User;

/// A short key bound to a target URL and owned by one user.
///
/// The key is the identity of the link and never changes after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub key: String,
    pub target_url: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(key: String, target_url: String, user_id: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            key,
            target_url,
            user_id,
            created_at,
        }
    }

    /// Returns true if `user_id` owns this link.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub key: String,
    pub target_url: String,
    pub user_id: i64,
}

/// A link together with its total click count, as shown in listings.
#[derive(Debug, Clone)]
pub struct LinkSummary {
    pub link: Link,
    pub total_clicks: i64,
}

/// Full analytics view of a single link.
#[derive(Debug, Clone)]
pub struct LinkDetail {
    pub link: Link,
    pub total_clicks: i64,
    pub clicks: Vec<ClickDetail>,
    /// Profile of the user who requested the detail view.
    pub user: User,
}
