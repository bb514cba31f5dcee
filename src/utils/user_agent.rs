//! Best-effort browser classification from user-agent strings.

use woothee::parser::Parser;

use crate::domain::entities::Browser;

/// Value woothee reports for fields it could not classify.
const WOOTHEE_UNKNOWN: &str = "UNKNOWN";

/// Parses a raw user-agent header into a [`Browser`].
///
/// Missing or unrecognised user agents classify as [`Browser::unknown`];
/// this never fails.
pub fn parse_browser(user_agent: Option<&str>) -> Browser {
    let Some(ua) = user_agent.filter(|ua| !ua.trim().is_empty()) else {
        return Browser::unknown();
    };

    let Some(result) = Parser::new().parse(ua) else {
        return Browser::unknown();
    };

    Browser {
        name: known_or_unknown(result.name),
        version: Some(result.version)
            .filter(|v| !v.is_empty() && *v != WOOTHEE_UNKNOWN)
            .map(|v| v.to_string()),
        os: known_or_unknown(result.os),
        category: known_or_unknown(result.category),
    }
}

fn known_or_unknown(value: &str) -> String {
    if value.is_empty() || value == WOOTHEE_UNKNOWN {
        Browser::UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}
