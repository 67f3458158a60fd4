//! Render-ready view models for reviews.
//!
//! Converts a normalized [`Review`] into the card summary, the full
//! detail view, and the related-items selection consumed by the
//! rendering layer. View models are projections and are never persisted.

use chrono::NaiveDate;
use serde::Serialize;

use crate::rating::{rating_class, rating_label, stars, Stars};
use crate::review::Review;

/// Maximum number of related reviews shown under a detail view.
pub const RELATED_LIMIT: usize = 3;

/* --------------------------------------------------------------------------
Card view
-------------------------------------------------------------------------- */

/// Summary card for listing grids.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub slug: String,
    pub title: String,
    pub genre: String,
    /// First platform of the record, the card's "primary" platform.
    pub primary_platform: String,
    /// Whether the card should render a `+` overflow marker.
    pub has_more_platforms: bool,
    pub rating: u8,
    pub rating_class: &'static str,
    pub excerpt: String,
    /// `Month D, YYYY`.
    pub formatted_date: String,
    pub cover_image: String,
    pub author: String,
    pub author_avatar: String,
    pub featured: bool,
}

/// Project a review into its listing card.
pub fn card(review: &Review) -> CardView {
    CardView {
        slug: review.slug.clone(),
        title: review.title.clone(),
        genre: review.genre.clone(),
        primary_platform: review.platform.first().cloned().unwrap_or_default(),
        has_more_platforms: review.platform.len() > 1,
        rating: review.rating,
        rating_class: rating_class(review.rating),
        excerpt: review.excerpt.clone(),
        formatted_date: format_date(review.date),
        cover_image: review.cover_image.clone(),
        author: review.author.clone(),
        author_avatar: review.author_avatar.clone(),
        featured: review.featured,
    }
}

/* --------------------------------------------------------------------------
Detail view
-------------------------------------------------------------------------- */

/// Full review page view model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    pub slug: String,
    pub title: String,
    pub genre: String,
    pub platforms: Vec<String>,
    pub rating: u8,
    pub rating_class: &'static str,
    pub rating_label: &'static str,
    pub stars: Stars,
    pub author: String,
    pub author_avatar: String,
    pub formatted_date: String,
    pub tags: Vec<String>,
    pub excerpt: String,
    /// Full rich-text body.
    pub content: String,
    pub cover_image: String,
    pub header_image: String,
}

/// Project a review into its detail page view model.
pub fn detail(review: &Review) -> DetailView {
    DetailView {
        slug: review.slug.clone(),
        title: review.title.clone(),
        genre: review.genre.clone(),
        platforms: review.platform.clone(),
        rating: review.rating,
        rating_class: rating_class(review.rating),
        rating_label: rating_label(review.rating),
        stars: stars(review.rating),
        author: review.author.clone(),
        author_avatar: review.author_avatar.clone(),
        formatted_date: format_date(review.date),
        tags: review.tags.clone(),
        excerpt: review.excerpt.clone(),
        content: review.content.clone(),
        cover_image: review.cover_image.clone(),
        header_image: review.header_image.clone(),
    }
}

/* --------------------------------------------------------------------------
Related items
-------------------------------------------------------------------------- */

/// Up to [`RELATED_LIMIT`] other reviews sharing the genre or at least one
/// platform with `current`. The current review is always excluded; results
/// keep the input collection order (no similarity ranking).
pub fn related<'a>(current: &Review, collection: &'a [Review]) -> Vec<&'a Review> {
    collection
        .iter()
        .filter(|r| r.slug != current.slug)
        .filter(|r| {
            r.genre == current.genre
                || r.platform.iter().any(|p| current.platform.contains(p))
        })
        .take(RELATED_LIMIT)
        .collect()
}

/* --------------------------------------------------------------------------
Featured rotation
-------------------------------------------------------------------------- */

/// Explicit slider state for multi-feature contexts.
///
/// Zero, one, or many reviews may be featured; the rotation just tracks
/// which slide is current and wraps at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedRotation {
    len: usize,
    current: usize,
}

impl FeaturedRotation {
    /// Rotation over `len` featured items, starting at the first slide.
    pub fn new(len: usize) -> Self {
        Self { len, current: 0 }
    }

    /// Index of the current slide. `None` when there is nothing featured.
    pub fn current(&self) -> Option<usize> {
        (self.len > 0).then_some(self.current)
    }

    /// Advance one slide, wrapping past the end.
    pub fn next(&mut self) {
        if self.len > 0 {
            self.current = (self.current + 1) % self.len;
        }
    }

    /// Go back one slide, wrapping past the start.
    pub fn prev(&mut self) {
        if self.len > 0 {
            self.current = (self.current + self.len - 1) % self.len;
        }
    }

    /// Jump to a specific slide. Out-of-range indexes are ignored.
    pub fn go_to(&mut self, index: usize) {
        if index < self.len {
            self.current = index;
        }
    }
}

/* --------------------------------------------------------------------------
Formatting
-------------------------------------------------------------------------- */

/// Format a date as `Month D, YYYY` (e.g. `March 5, 2024`).
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
