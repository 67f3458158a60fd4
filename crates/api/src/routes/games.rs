//! Game-metadata lookup routes used by the admin form auto-fill.

use axum::routing::get;
use axum::Router;

use crate::handlers::games;
use crate::state::AppState;

/// Game-metadata routes mounted at `/games`.
///
/// ```text
/// GET /search   -> search_games (?q=)
/// GET /{id}     -> game_draft
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(games::search_games))
        .route("/{id}", get(games::game_draft))
}
