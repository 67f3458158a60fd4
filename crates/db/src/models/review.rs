//! Review row and write-record types.

use chrono::NaiveDate;
use gamehub_core::review::{PlatformField, RawReview, Review};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewRow {
    pub slug: String,
    pub title: String,
    pub genre: String,
    pub platforms: Vec<String>,
    pub rating: i32,
    pub author: String,
    pub review_date: NaiveDate,
    pub featured: bool,
    pub cover_image: String,
    pub header_image: String,
    pub tags: Vec<String>,
    pub excerpt: String,
    pub content: String,
    pub author_avatar: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ReviewRow> for RawReview {
    fn from(row: ReviewRow) -> Self {
        RawReview {
            id: Some(row.slug.clone()),
            slug: Some(row.slug),
            title: Some(row.title),
            genre: Some(row.genre),
            platform: Some(PlatformField::Many(row.platforms)),
            rating: Some(i64::from(row.rating)),
            author: Some(row.author),
            date: Some(row.review_date.format("%Y-%m-%d").to_string()),
            featured: row.featured,
            cover_image: Some(row.cover_image),
            header_image: Some(row.header_image),
            tags: Some(row.tags),
            excerpt: Some(row.excerpt),
            content: Some(row.content),
            author_avatar: Some(row.author_avatar),
        }
    }
}

impl ReviewRow {
    /// Convert a stored row into the normalized domain shape.
    ///
    /// Rows are fully typed so this cannot lose information; it funnels
    /// through the same normalization boundary as every other source.
    pub fn into_review(self) -> Review {
        gamehub_core::review::normalize(self.into())
    }
}

/// The full set of writable columns, used for both insert and update.
///
/// Built by the API layer from a validated request; `slug` and `excerpt`
/// have already been derived at that point.
#[derive(Debug, Clone)]
pub struct ReviewRecord {
    pub slug: String,
    pub title: String,
    pub genre: String,
    pub platforms: Vec<String>,
    pub rating: i32,
    pub author: String,
    pub review_date: NaiveDate,
    pub featured: bool,
    pub cover_image: String,
    pub header_image: String,
    pub tags: Vec<String>,
    pub excerpt: String,
    pub content: String,
    pub author_avatar: String,
}

impl ReviewRecord {
    /// Build a write record from a normalized review.
    pub fn from_review(review: Review) -> Self {
        Self {
            slug: review.slug,
            title: review.title,
            genre: review.genre,
            platforms: review.platform,
            rating: i32::from(review.rating),
            author: review.author,
            review_date: review.date,
            featured: review.featured,
            cover_image: review.cover_image,
            header_image: review.header_image,
            tags: review.tags,
            excerpt: review.excerpt,
            content: review.content,
            author_avatar: review.author_avatar,
        }
    }
}
