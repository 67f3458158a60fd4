pub mod admin;
pub mod games;
pub mod health;
pub mod reviews;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /reviews                       public listing (filter/sort/search params)
/// /reviews/latest                the N most recent reviews
/// /reviews/featured              featured reviews (carousel)
/// /reviews/facets                genre/platform filter options
/// /reviews/{slug}                detail view plus related reviews
///
/// /admin/reviews                 admin listing (GET), create (POST)
/// /admin/reviews/export          export full collection
/// /admin/reviews/import          bulk import (POST)
/// /admin/reviews/{slug}          update, delete
/// /admin/dashboard               aggregate statistics
///
/// /games/search                  game-metadata search (admin only)
/// /games/{id}                    auto-fill draft for a game (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/reviews", reviews::router())
        .nest("/admin", admin::router())
        .nest("/games", games::router())
}
