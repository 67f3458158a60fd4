//! Handlers for game-metadata lookup (admin form auto-fill).

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use gamehub_core::error::CoreError;
use gamehub_metadata::autofill_draft;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GameSearchParams {
    pub q: Option<String>,
}

/// GET /api/v1/games/search
///
/// Search the metadata API by name. Queries shorter than two characters
/// return an empty list without an upstream call.
pub async fn search_games(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(params): Query<GameSearchParams>,
) -> AppResult<impl IntoResponse> {
    let results = state
        .metadata
        .search(params.q.as_deref().unwrap_or(""))
        .await?;

    Ok(Json(DataResponse { data: results }))
}

/// GET /api/v1/games/{id}
///
/// Auto-fill draft for a game: mapped genre, platforms, tags, modes, and
/// key art, ready to pre-populate the review form.
pub async fn game_draft(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let game = state
        .metadata
        .details(game_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Game",
            id: game_id.to_string(),
        }))?;

    Ok(Json(DataResponse {
        data: autofill_draft(&game),
    }))
}
