//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A click recorded when a short link is resolved.
///
/// `user_agent` is the raw header value, or `None` when the visitor sent none.
#[derive(Debug, Clone, PartialEq)]
pub struct Click {
    pub id: i64,
    pub link_key: String,
    pub clicked_at: DateTime<Utc>,
    pub user_agent: Option<String>,
}

impl Click {
    /// Creates a new Click instance.
    pub fn new(
        id: i64,
        link_key: String,
        clicked_at: DateTime<Utc>,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            id,
            link_key,
            clicked_at,
            user_agent,
        }
    }
}

/// Outcome of a successful redirect resolution: the stored target and the
/// click that was written for it.
#[derive(Debug, Clone)]
pub struct RecordedClick {
    pub target_url: String,
    pub click: Click,
}

/// Browser classification derived from a user-agent string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Browser {
    pub name: String,
    pub version: Option<String>,
    pub os: String,
    pub category: String,
}

impl Browser {
    pub const UNKNOWN: &'static str = "Unknown";

    /// Classification used for missing or unparseable user agents.
    pub fn unknown() -> Self {
        Self {
            name: Self::UNKNOWN.to_string(),
            version: None,
            os: Self::UNKNOWN.to_string(),
            category: Self::UNKNOWN.to_string(),
        }
    }
}

/// One entry of a link's click history as shown in the detail view.
#[derive(Debug, Clone)]
pub struct ClickDetail {
    pub id: i64,
    pub clicked_at: DateTime<Utc>,
    pub browser: Browser,
}
