//! Slug and excerpt derivation.
//!
//! Slugs double as document IDs, so generation must be deterministic:
//! the same title always yields the same slug.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum plain-text length of a generated excerpt, before the ellipsis.
pub const EXCERPT_MAX_CHARS: usize = 150;

static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Derive a URL-safe slug from a review title.
///
/// Lowercases, collapses every run of non-alphanumeric characters to a
/// single `-`, and strips leading/trailing separators.
///
/// ```
/// use gamehub_core::text::slug_from_title;
///
/// assert_eq!(
///     slug_from_title("The Legend of Zelda: Tears of the Kingdom!"),
///     "the-legend-of-zelda-tears-of-the-kingdom"
/// );
/// ```
pub fn slug_from_title(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    // Starts true so a leading separator is never emitted.
    let mut at_separator = true;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            at_separator = false;
        } else if !at_separator {
            slug.push('-');
            at_separator = true;
        }
    }

    if slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Strip HTML tags and collapse whitespace, yielding plain text.
pub fn strip_html(content: &str) -> String {
    let without_tags = HTML_TAG_RE.replace_all(content, " ");
    without_tags.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Generate a plain-text excerpt from rich HTML content.
///
/// The result is the HTML-stripped, whitespace-collapsed text, hard-capped
/// at [`EXCERPT_MAX_CHARS`] characters with a trailing `...` marker when
/// truncation happened. A truncated excerpt keeps exactly 150 characters
/// of text, so its total length is always 153.
pub fn excerpt_from_content(content: &str) -> String {
    let plain = strip_html(content);

    if plain.chars().count() <= EXCERPT_MAX_CHARS {
        return plain;
    }

    let mut truncated: String = plain.chars().take(EXCERPT_MAX_CHARS).collect();
    truncated.push_str("...");
    truncated
}
