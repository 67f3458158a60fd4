//! Dashboard statistics and filter facets, computed over the collection.

use serde::Serialize;

use crate::review::Review;

/// Aggregate numbers shown on the admin dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_reviews: usize,
    /// Mean rating rounded to one decimal; `0.0` for an empty collection.
    pub avg_rating: f64,
    pub featured_count: usize,
    pub genre_count: usize,
    pub genres: Vec<String>,
}

/// Compute dashboard statistics for a collection.
pub fn dashboard_stats(collection: &[Review]) -> DashboardStats {
    let genres = unique_genres(collection);

    let avg_rating = if collection.is_empty() {
        0.0
    } else {
        let sum: u32 = collection.iter().map(|r| u32::from(r.rating)).sum();
        let mean = f64::from(sum) / collection.len() as f64;
        (mean * 10.0).round() / 10.0
    };

    DashboardStats {
        total_reviews: collection.len(),
        avg_rating,
        featured_count: collection.iter().filter(|r| r.featured).count(),
        genre_count: genres.len(),
        genres,
    }
}

/// Distinct genres, sorted, for the filter dropdown.
pub fn unique_genres(collection: &[Review]) -> Vec<String> {
    let mut genres: Vec<String> = collection
        .iter()
        .map(|r| r.genre.clone())
        .filter(|g| !g.is_empty())
        .collect();
    genres.sort();
    genres.dedup();
    genres
}

/// Distinct platforms across all reviews, sorted, for the filter dropdown.
pub fn unique_platforms(collection: &[Review]) -> Vec<String> {
    let mut platforms: Vec<String> = collection
        .iter()
        .flat_map(|r| r.platform.iter().cloned())
        .collect();
    platforms.sort();
    platforms.dedup();
    platforms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::{normalize, PlatformField, RawReview};

    fn review(genre: &str, platforms: &[&str], rating: i64, featured: bool) -> Review {
        normalize(RawReview {
            title: Some(format!("{genre} game")),
            genre: Some(genre.to_string()),
            platform: Some(PlatformField::Many(
                platforms.iter().map(|p| p.to_string()).collect(),
            )),
            rating: Some(rating),
            featured,
            ..Default::default()
        })
    }

    #[test]
    fn stats_over_empty_collection() {
        let stats = dashboard_stats(&[]);

        assert_eq!(stats.total_reviews, 0);
        assert_eq!(stats.avg_rating, 0.0);
        assert_eq!(stats.featured_count, 0);
        assert!(stats.genres.is_empty());
    }

    #[test]
    fn average_is_rounded_to_one_decimal() {
        let collection = vec![
            review("RPG", &["PC"], 8, true),
            review("FPS", &["PC"], 7, false),
            review("RPG", &["PS5"], 7, false),
        ];
        let stats = dashboard_stats(&collection);

        assert_eq!(stats.total_reviews, 3);
        assert_eq!(stats.avg_rating, 7.3);
        assert_eq!(stats.featured_count, 1);
        assert_eq!(stats.genre_count, 2);
        assert_eq!(stats.genres, vec!["FPS", "RPG"]);
    }

    #[test]
    fn platforms_are_deduplicated_and_sorted() {
        let collection = vec![
            review("RPG", &["PC", "Switch"], 8, false),
            review("FPS", &["PC", "PS5"], 7, false),
        ];

        assert_eq!(unique_platforms(&collection), vec!["PC", "PS5", "Switch"]);
    }
}
