//! GitHub Projects (classic) API response types

use serde::{Deserialize, Serialize};

/// Column metadata from `GET /projects/columns/{id}`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ColumnData {
    pub name: String,
}

/// A single card from `GET /projects/columns/{id}/cards`
///
/// Note cards carry free text in `note`. Issue and pull request cards leave
/// `note` empty and point at the linked resource through `content_url`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ColumnCard {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub content_url: Option<String>,
}

impl ColumnCard {
    /// The card's note, treating an empty string as absent
    pub fn note_text(&self) -> Option<&str> {
        self.note.as_deref().filter(|n| !n.is_empty())
    }

    /// The content URL to resolve, if the card has no note of its own
    pub fn pending_content_url(&self) -> Option<&str> {
        match self.note_text() {
            Some(_) => None,
            None => self.content_url.as_deref().filter(|u| !u.is_empty()),
        }
    }
}

/// Issue or pull request referenced by a card's `content_url`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ContentItem {
    pub title: String,
    pub html_url: String,
}

impl ContentItem {
    /// Last path segment of `html_url`, i.e. the issue or pull request number
    ///
    /// The segment is taken verbatim, so a URL ending in `/` yields `""`.
    pub fn short_id(&self) -> &str {
        last_segment(&self.html_url)
    }

    /// Like [`ContentItem::short_id`], ignoring a trailing `/`
    pub fn trimmed_short_id(&self) -> &str {
        last_segment(self.html_url.trim_end_matches('/'))
    }
}

fn last_segment(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or_default()
}
