//! Review record shapes and the normalization boundary.
//!
//! Stored documents are loosely typed: fields go missing, `platform` shows
//! up as a bare string or an array, dates arrive as free-form strings.
//! [`normalize`] resolves all of that exactly once into [`Review`], and
//! nothing past this boundary re-checks optionality.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::text::{excerpt_from_content, slug_from_title};

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Fallback cover image when a review has none.
pub const DEFAULT_COVER_IMAGE: &str =
    "https://images.unsplash.com/photo-1538481199705-c710c4e965fc?w=800&h=600&fit=crop";

/// Fallback header image when a review has none.
pub const DEFAULT_HEADER_IMAGE: &str =
    "https://images.unsplash.com/photo-1538481199705-c710c4e965fc?w=1600&h=900&fit=crop";

/// Known author avatars. Unknown authors fall back to the first entry.
const AUTHOR_AVATARS: &[(&str, &str)] = &[
    (
        "Alex",
        "https://images.unsplash.com/photo-1535713875002-d1d0cf377fde?w=100&h=100&fit=crop",
    ),
    (
        "Jordan",
        "https://images.unsplash.com/photo-1599566150163-29194dcabd36?w=100&h=100&fit=crop",
    ),
];

/// Avatar URL for an author name, with a default for unknown authors.
pub fn author_avatar(author: &str) -> &'static str {
    AUTHOR_AVATARS
        .iter()
        .find(|(name, _)| *name == author)
        .map(|(_, url)| *url)
        .unwrap_or(AUTHOR_AVATARS[0].1)
}

/* --------------------------------------------------------------------------
Raw (loosely typed) shape
-------------------------------------------------------------------------- */

/// `platform` as stored: either a single value or an array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlatformField {
    One(String),
    Many(Vec<String>),
}

/// A review document as it comes off the wire or out of the store.
///
/// Every field is optional; [`normalize`] supplies documented defaults.
/// Field names are camelCase to match the stored document format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawReview {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub genre: Option<String>,
    pub platform: Option<PlatformField>,
    pub rating: Option<i64>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub featured: bool,
    pub cover_image: Option<String>,
    pub header_image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub author_avatar: Option<String>,
}

/* --------------------------------------------------------------------------
Normalized shape
-------------------------------------------------------------------------- */

/// A review record guaranteed to satisfy the domain shape invariants.
///
/// Produced only by [`normalize`]. `slug` equals `id` for store-backed
/// records; both are empty when the raw record carried no title and no
/// identifier, which callers must guard against before using the record
/// as an addressable entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub genre: String,
    /// Never re-checked for scalar-vs-array past this point. May be empty
    /// only for records that predate platform validation.
    pub platform: Vec<String>,
    /// Clamped to 0..=10.
    pub rating: u8,
    pub author: String,
    pub date: NaiveDate,
    pub featured: bool,
    pub cover_image: String,
    pub header_image: String,
    pub tags: Vec<String>,
    pub excerpt: String,
    pub content: String,
    pub author_avatar: String,
}

/// Canonicalize a raw document into a [`Review`]. Never fails: malformed
/// or missing optional fields degrade to defaults.
///
/// - `platform` scalar is wrapped into a one-element list.
/// - An unparseable or missing `date` becomes the epoch date, which sorts
///   last under the default descending-date order.
/// - A missing `excerpt` is derived from `content`.
/// - `slug` falls back to the explicit `id`, then to a slug derived from
///   the title.
pub fn normalize(raw: RawReview) -> Review {
    let title = raw.title.unwrap_or_default();

    let slug = raw
        .slug
        .or(raw.id)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| slug_from_title(&title));

    let platform = match raw.platform {
        Some(PlatformField::One(p)) => vec![p],
        Some(PlatformField::Many(ps)) => ps,
        None => Vec::new(),
    };

    let rating = raw.rating.unwrap_or(0).clamp(0, 10) as u8;

    let date = raw
        .date
        .as_deref()
        .and_then(parse_review_date)
        .unwrap_or_default();

    let content = raw.content.unwrap_or_default();

    let excerpt = raw
        .excerpt
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| excerpt_from_content(&content));

    let author = raw.author.unwrap_or_default();

    let author_avatar = raw
        .author_avatar
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| author_avatar(&author).to_string());

    Review {
        id: slug.clone(),
        slug,
        title,
        genre: raw.genre.unwrap_or_default(),
        platform,
        rating,
        author,
        date,
        featured: raw.featured,
        cover_image: raw
            .cover_image
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_COVER_IMAGE.to_string()),
        header_image: raw
            .header_image
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HEADER_IMAGE.to_string()),
        tags: raw.tags.unwrap_or_default(),
        excerpt,
        content,
        author_avatar,
    }
}

/// Parse a stored date string. Accepts `YYYY-MM-DD`, with or without a
/// trailing time component.
fn parse_review_date(s: &str) -> Option<NaiveDate> {
    let date_part = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
