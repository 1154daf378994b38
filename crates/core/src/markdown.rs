//! Card to Markdown transformations
//!
//! Each displayable card becomes one `- <text>` bullet. Output order always
//! follows the order the cards were returned by the API.

use crate::github::{ColumnCard, ContentItem};
use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::LazyLock;

/// Default base URL for `D<digits>-code` review shortcodes
pub const DEFAULT_SHORTCODE_BASE: &str = "https://code.a8c.com";

static SHORTCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"D(\d+)-code").expect("shortcode regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("whitespace regex"));

/// How links to issues and pull requests are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkStyle {
    /// `[42](https://github.com/org/repo/issues/42})`
    ///
    /// Keeps the trailing `}` inside the link target and takes the id
    /// verbatim from the last path segment, so output matches changelogs
    /// generated by earlier releases byte for byte.
    #[default]
    Legacy,
    /// `[42](https://github.com/org/repo/issues/42)`
    ///
    /// A trailing `/` on the URL is ignored when taking the id.
    Fixed,
}

/// Options for the card formatter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub shortcode_base: String,
    pub link_style: LinkStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            shortcode_base: DEFAULT_SHORTCODE_BASE.to_string(),
            link_style: LinkStyle::default(),
        }
    }
}

/// Output of a full column conversion
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChangelogOutput {
    pub column_id: u64,
    pub column_name: String,
    pub lines: Vec<String>,
}

impl ChangelogOutput {
    /// Render as a Markdown document, one newline-terminated bullet per line
    pub fn to_markdown(&self) -> String {
        render_markdown(&self.lines)
    }
}

/// Build a note for an issue or pull request card from its linked content
pub fn synthesize_note(content: &ContentItem, style: LinkStyle) -> String {
    match style {
        LinkStyle::Legacy => format!(
            "{} [{}]({}}})",
            content.title,
            content.short_id(),
            content.html_url
        ),
        LinkStyle::Fixed => format!(
            "{} [{}]({})",
            content.title,
            content.trimmed_short_id(),
            content.html_url
        ),
    }
}

/// Rewrite every `D<digits>-code` occurrence into a Markdown link
pub fn replace_shortcodes(text: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    SHORTCODE
        .replace_all(text, |caps: &Captures| {
            format!("[D{id}]({base}/D{id})", id = &caps[1])
        })
        .into_owned()
}

/// Replace line breaks with spaces, then collapse the first whitespace run
///
/// Only the first run of two or more whitespace characters is collapsed.
/// Later runs are left as they are.
pub fn clean_line_breaks(text: &str) -> String {
    let flattened = text.replace(['\r', '\n'], " ");
    WHITESPACE_RUN.replace(&flattened, " ").into_owned()
}

/// Displayable text for a card, if it has any
///
/// `content` is the item behind the card's `content_url`, already fetched by
/// the caller. Cards with neither a note nor content yield `None`.
pub fn card_text(
    card: &ColumnCard,
    content: Option<&ContentItem>,
    style: LinkStyle,
) -> Option<String> {
    if let Some(note) = card.note_text() {
        return Some(note.to_string());
    }

    content.map(|c| synthesize_note(c, style))
}

/// Transform one card into its `- <text>` bullet
pub fn format_card(
    card: &ColumnCard,
    content: Option<&ContentItem>,
    options: &FormatOptions,
) -> Option<String> {
    let text = card_text(card, content, options.link_style)?;
    let linked = replace_shortcodes(&text, &options.shortcode_base);

    Some(format!("- {}", clean_line_breaks(&linked)))
}

/// Join bullet lines into one document
pub fn render_markdown(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

/// Transform the fetched cards of a column into changelog output
///
/// Each card is paired with its resolved content, if any. Skipped cards
/// produce no line. The order of `cards` is preserved.
pub fn transform_column(
    column_id: u64,
    column_name: String,
    cards: Vec<(ColumnCard, Option<ContentItem>)>,
    options: &FormatOptions,
) -> ChangelogOutput {
    let lines = cards
        .iter()
        .filter_map(|(card, content)| format_card(card, content.as_ref(), options))
        .collect();

    ChangelogOutput {
        column_id,
        column_name,
        lines,
    }
}
