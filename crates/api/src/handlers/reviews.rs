//! Handlers for the public review browsing surface.
//!
//! Listing goes through the catalog's orchestrated query pipeline; the
//! debounced path is used when a free-text search term is present, the
//! immediate path otherwise.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use gamehub_core::error::CoreError;
use gamehub_core::present::{card, detail, CardView, DetailView};
use gamehub_core::query::{FilterSpec, SortKey};
use gamehub_core::stats::{unique_genres, unique_platforms};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Default size of the latest-reviews strip.
const DEFAULT_LATEST_LIMIT: usize = 6;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Query parameters for the public listing.
///
/// `rating` is the minimum-rating threshold as a string so the literal
/// `"all"` can be accepted alongside numbers. Unrecognized `sort` values
/// fall back to newest-first. `session` scopes last-trigger-wins: a
/// client that wants rapid re-queries to supersede each other sends a
/// stable key; requests without one never interact.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewListParams {
    pub genre: Option<String>,
    pub platform: Option<String>,
    pub rating: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub session: Option<String>,
}

impl ReviewListParams {
    fn filter_spec(&self) -> FilterSpec {
        FilterSpec {
            genre: self.genre.clone(),
            platform: self.platform.clone(),
            rating_min: self
                .rating
                .as_deref()
                .and_then(|r| r.parse().ok()),
            search: self.search.clone(),
        }
    }

    fn sort_key(&self) -> SortKey {
        SortKey::parse(self.sort.as_deref().unwrap_or(""))
    }

    /// Whether a free-text search term is present (debounced path).
    fn is_search(&self) -> bool {
        self.search.as_deref().is_some_and(|s| !s.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct LatestParams {
    pub limit: Option<usize>,
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// Listing response: cards plus the run's supersession metadata, so a
/// client holding several in-flight requests can discard stale ones.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewListResponse {
    pub seq: u64,
    pub superseded: bool,
    pub result_count: usize,
    pub reviews: Vec<CardView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetsResponse {
    pub genres: Vec<String>,
    pub platforms: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDetailResponse {
    pub review: DetailView,
    pub related: Vec<CardView>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/reviews
///
/// Filtered, sorted listing. Search requests are debounced so only the
/// last of a rapid burst from the same session runs the pipeline;
/// sessions are independent of each other.
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(params): Query<ReviewListParams>,
) -> AppResult<impl IntoResponse> {
    let spec = params.filter_spec();
    let sort = params.sort_key();
    let session = params.session.as_deref();

    let outcome = if params.is_search() {
        state.catalog.query_debounced(session, spec, sort).await
    } else {
        state.catalog.query(session, spec, sort).await
    };

    let reviews: Vec<CardView> = outcome.results.iter().map(card).collect();

    Ok(Json(DataResponse {
        data: ReviewListResponse {
            seq: outcome.seq,
            superseded: outcome.superseded,
            result_count: reviews.len(),
            reviews,
        },
    }))
}

/// GET /api/v1/reviews/latest
///
/// The most recent reviews, default 6, for the home page strip.
pub async fn latest_reviews(
    State(state): State<AppState>,
    Query(params): Query<LatestParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_LATEST_LIMIT);
    let latest = state.catalog.latest(limit).await;

    let cards: Vec<CardView> = latest.iter().map(card).collect();
    Ok(Json(DataResponse { data: cards }))
}

/// GET /api/v1/reviews/featured
///
/// Featured reviews for the carousel, newest first. Falls back to the
/// single latest review when nothing is flagged.
pub async fn featured_reviews(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let featured = state.catalog.featured().await;

    let views: Vec<DetailView> = featured.iter().map(detail).collect();
    Ok(Json(DataResponse { data: views }))
}

/// GET /api/v1/reviews/facets
///
/// Distinct genres and platforms for the filter dropdowns.
pub async fn review_facets(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let collection = state.catalog.collection().await;

    Ok(Json(DataResponse {
        data: FacetsResponse {
            genres: unique_genres(&collection),
            platforms: unique_platforms(&collection),
        },
    }))
}

/// GET /api/v1/reviews/{slug}
///
/// Detail view plus the related-reviews selection.
pub async fn get_review(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let review = state.catalog.find(&slug).await.ok_or(AppError::Core(
        CoreError::NotFound {
            entity: "Review",
            id: slug,
        },
    ))?;

    let related = state.catalog.related(&review).await;

    Ok(Json(DataResponse {
        data: ReviewDetailResponse {
            review: detail(&review),
            related: related.iter().map(card).collect(),
        },
    }))
}
