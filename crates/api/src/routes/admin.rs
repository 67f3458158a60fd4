//! Admin review-management routes. Every handler requires an allowlisted
//! admin token.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Admin routes mounted at `/admin`.
///
/// ```text
/// GET    /reviews         -> list_reviews (?search=)
/// POST   /reviews         -> create_review
/// GET    /reviews/export  -> export_reviews
/// POST   /reviews/import  -> import_reviews
/// PUT    /reviews/{slug}  -> update_review
/// DELETE /reviews/{slug}  -> delete_review
/// GET    /dashboard       -> dashboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reviews", get(admin::list_reviews).post(admin::create_review))
        .route("/reviews/export", get(admin::export_reviews))
        .route("/reviews/import", post(admin::import_reviews))
        .route(
            "/reviews/{slug}",
            put(admin::update_review).delete(admin::delete_review),
        )
        .route("/dashboard", get(admin::dashboard))
}
