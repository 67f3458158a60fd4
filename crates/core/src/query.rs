//! Filter evaluation and stable sorting over normalized reviews.
//!
//! `query` is a pure function of (collection, filter spec, sort key) and
//! is the single code path behind the public listing, the latest-N strip,
//! and the interactive re-query loop.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::review::Review;

/* --------------------------------------------------------------------------
Filter specification
-------------------------------------------------------------------------- */

/// Filter criteria for a review query. All predicates are ANDed; `None`
/// (or the literal `"all"`) means no constraint for that field.
///
/// Rating uses the single-threshold convention: `rating_min: Some(7)`
/// keeps reviews rated 7 or higher.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterSpec {
    /// Exact genre match.
    pub genre: Option<String>,
    /// Membership match against the review's platform set.
    pub platform: Option<String>,
    /// Inclusive minimum rating.
    pub rating_min: Option<u8>,
    /// Case-insensitive substring match over title or excerpt.
    pub search: Option<String>,
}

impl FilterSpec {
    /// Whether a single review satisfies every set predicate.
    pub fn matches(&self, review: &Review) -> bool {
        if let Some(genre) = constrained(&self.genre) {
            if !review.genre.eq_ignore_ascii_case(genre) {
                return false;
            }
        }

        if let Some(platform) = constrained(&self.platform) {
            if !review.platform.iter().any(|p| p.eq_ignore_ascii_case(platform)) {
                return false;
            }
        }

        if let Some(min) = self.rating_min {
            if review.rating < min {
                return false;
            }
        }

        if let Some(search) = constrained(&self.search) {
            let needle = search.to_lowercase();
            let in_title = review.title.to_lowercase().contains(&needle);
            let in_excerpt = review.excerpt.to_lowercase().contains(&needle);
            if !in_title && !in_excerpt {
                return false;
            }
        }

        true
    }
}

/// Treat `None`, empty, and the literal `"all"` as "no constraint".
fn constrained(field: &Option<String>) -> Option<&str> {
    match field.as_deref() {
        None | Some("") | Some("all") => None,
        Some(value) => Some(value),
    }
}

/* --------------------------------------------------------------------------
Sort keys
-------------------------------------------------------------------------- */

/// Recognized sort orders. Unrecognized key strings fall back to the
/// default (`DateDesc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    RatingDesc,
    RatingAsc,
    TitleAsc,
    TitleDesc,
}

impl SortKey {
    /// Parse a sort key string, falling back to the default for anything
    /// unrecognized.
    pub fn parse(key: &str) -> Self {
        match key {
            "date-desc" => SortKey::DateDesc,
            "date-asc" => SortKey::DateAsc,
            "rating-desc" => SortKey::RatingDesc,
            "rating-asc" => SortKey::RatingAsc,
            "title-asc" => SortKey::TitleAsc,
            "title-desc" => SortKey::TitleDesc,
            _ => SortKey::default(),
        }
    }

    fn compare(self, a: &Review, b: &Review) -> Ordering {
        match self {
            SortKey::DateDesc => b.date.cmp(&a.date),
            SortKey::DateAsc => a.date.cmp(&b.date),
            SortKey::RatingDesc => b.rating.cmp(&a.rating),
            SortKey::RatingAsc => a.rating.cmp(&b.rating),
            SortKey::TitleAsc => title_key(&a.title).cmp(&title_key(&b.title)),
            SortKey::TitleDesc => title_key(&b.title).cmp(&title_key(&a.title)),
        }
    }
}

/// Case-insensitive collation key for title ordering.
fn title_key(title: &str) -> String {
    title.to_lowercase()
}

/* --------------------------------------------------------------------------
Query pipeline
-------------------------------------------------------------------------- */

/// Filter and sort a collection of normalized reviews.
///
/// Filtering preserves input order; sorting is stable, so records with
/// equal sort keys keep their relative order. The input is borrowed and
/// never mutated.
pub fn query(collection: &[Review], spec: &FilterSpec, sort: SortKey) -> Vec<Review> {
    let mut results: Vec<Review> = collection
        .iter()
        .filter(|r| spec.matches(r))
        .cloned()
        .collect();

    results.sort_by(|a, b| sort.compare(a, b));
    results
}

/// The `n` most recent reviews: a full `date-desc` sort followed by a
/// prefix take.
pub fn latest(collection: &[Review], n: usize) -> Vec<Review> {
    let mut results = query(collection, &FilterSpec::default(), SortKey::DateDesc);
    results.truncate(n);
    results
}
