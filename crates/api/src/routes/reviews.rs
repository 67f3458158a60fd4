//! Public review browsing routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

/// Public review routes mounted at `/reviews`.
///
/// ```text
/// GET /            -> list_reviews
/// GET /latest      -> latest_reviews
/// GET /featured    -> featured_reviews
/// GET /facets      -> review_facets
/// GET /{slug}      -> get_review
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reviews::list_reviews))
        .route("/latest", get(reviews::latest_reviews))
        .route("/featured", get(reviews::featured_reviews))
        .route("/facets", get(reviews::review_facets))
        .route("/{slug}", get(reviews::get_review))
}
