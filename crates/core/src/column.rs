//! Column URL parsing and GitHub endpoint URL construction

use crate::Error;
use regex::Regex;
use std::sync::LazyLock;

/// Default GitHub REST API host
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

static COLUMN_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#column-(\d+)$").expect("column fragment regex"));

/// Extract the numeric column id from a GitHub Projects (classic) column URL
///
/// The URL must end with `#column-<digits>`, e.g.
/// `https://github.com/orgs/acme/projects/148#column-123` yields `123`.
/// Surrounding whitespace is ignored.
pub fn parse_column_id(url: &str) -> Result<u64, Error> {
    let trimmed = url.trim();

    COLUMN_FRAGMENT
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .ok_or_else(|| Error::InvalidColumnUrl(trimmed.to_string()))
}

/// `GET /projects/columns/{id}` endpoint
pub fn column_url(api_base: &str, column_id: u64) -> String {
    format!(
        "{}/projects/columns/{column_id}",
        api_base.trim_end_matches('/')
    )
}

/// `GET /projects/columns/{id}/cards` endpoint
pub fn column_cards_url(api_base: &str, column_id: u64) -> String {
    format!("{}/cards", column_url(api_base, column_id))
}
