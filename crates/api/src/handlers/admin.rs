//! Handlers for the admin review-management surface.
//!
//! Writes go straight to the repository (not through the catalog) so an
//! admin always sees and edits the authoritative rows. Slug, excerpt,
//! and avatar are derived server-side from the validated input.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use gamehub_core::error::CoreError;
use gamehub_core::review::{self, author_avatar, RawReview, Review};
use gamehub_core::stats::dashboard_stats;
use gamehub_core::text::{excerpt_from_content, slug_from_title};
use gamehub_db::models::review::ReviewRecord;
use gamehub_db::repositories::ReviewRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Input shapes
// ---------------------------------------------------------------------------

/// Review form payload for create and update.
///
/// Slug, excerpt, and author avatar are never accepted from the client;
/// they are derived here. Validation messages are user-facing and match
/// the admin form's inline errors.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    #[validate(length(min = 1, message = "Title is required."))]
    pub title: String,

    #[validate(length(min = 1, message = "Genre is required."))]
    pub genre: String,

    #[validate(length(min = 1, message = "Please select at least one platform."))]
    pub platform: Vec<String>,

    #[validate(range(min = 0, max = 10, message = "Rating must be between 0 and 10."))]
    pub rating: i32,

    #[validate(length(min = 1, message = "Author is required."))]
    pub author: String,

    /// Review date; defaults to today when omitted.
    pub date: Option<NaiveDate>,

    #[serde(default)]
    pub featured: bool,

    pub cover_image: Option<String>,
    pub header_image: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Optional hand-written excerpt; derived from content when empty.
    pub excerpt: Option<String>,

    #[validate(length(min = 1, message = "Review content is required."))]
    pub content: String,
}

impl ReviewInput {
    /// Validate and convert into a write record, deriving slug, excerpt,
    /// and avatar.
    fn into_record(self) -> Result<ReviewRecord, AppError> {
        self.validate()
            .map_err(|e| AppError::Core(CoreError::Validation(first_message(&e))))?;

        let slug = slug_from_title(&self.title);
        if slug.is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Title must contain at least one letter or number.".into(),
            )));
        }

        let excerpt = self
            .excerpt
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| excerpt_from_content(&self.content));

        Ok(ReviewRecord {
            slug,
            title: self.title,
            genre: self.genre,
            platforms: self.platform,
            rating: self.rating,
            author_avatar: author_avatar(&self.author).to_string(),
            author: self.author,
            review_date: self.date.unwrap_or_else(|| chrono::Utc::now().date_naive()),
            featured: self.featured,
            cover_image: self
                .cover_image
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| review::DEFAULT_COVER_IMAGE.to_string()),
            header_image: self
                .header_image
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| review::DEFAULT_HEADER_IMAGE.to_string()),
            tags: self.tags,
            excerpt,
            content: self.content,
        })
    }
}

/// First user-facing message out of a validation failure.
fn first_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .into_values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Invalid input".to_string())
}

#[derive(Debug, Deserialize)]
pub struct AdminListParams {
    pub search: Option<String>,
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// Outcome of a bulk import.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

// ---------------------------------------------------------------------------
// Review CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/reviews
///
/// Full listing for the admin table, optionally narrowed by a search
/// term over title, genre, and author.
pub async fn list_reviews(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(params): Query<AdminListParams>,
) -> AppResult<impl IntoResponse> {
    let rows = ReviewRepo::search(&state.pool, params.search.as_deref().unwrap_or("")).await?;

    let reviews: Vec<Review> = rows.into_iter().map(|r| r.into_review()).collect();
    Ok(Json(DataResponse { data: reviews }))
}

/// POST /api/v1/admin/reviews
///
/// Create a review. The slug is derived from the title; a duplicate
/// slug is a conflict, not an overwrite.
pub async fn create_review(
    admin: AdminUser,
    State(state): State<AppState>,
    Json(input): Json<ReviewInput>,
) -> AppResult<impl IntoResponse> {
    let record = input.into_record()?;

    let created = ReviewRepo::create(&state.pool, &record)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "A review with this title already exists.".into(),
            ))
        })?;

    tracing::info!(slug = %created.slug, admin = %admin.email, "Review created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: created.into_review(),
        }),
    ))
}

/// PUT /api/v1/admin/reviews/{slug}
///
/// Update a review. A title change renames the slug.
pub async fn update_review(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<ReviewInput>,
) -> AppResult<impl IntoResponse> {
    let record = input.into_record()?;

    let updated = ReviewRepo::update(&state.pool, &slug, &record)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id: slug,
        }))?;

    tracing::info!(slug = %updated.slug, admin = %admin.email, "Review updated");

    Ok(Json(DataResponse {
        data: updated.into_review(),
    }))
}

/// DELETE /api/v1/admin/reviews/{slug}
pub async fn delete_review(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let deleted = ReviewRepo::delete(&state.pool, &slug).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id: slug,
        }));
    }

    tracing::info!(slug = %slug, admin = %admin.email, "Review deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Dashboard and bulk transfer
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/dashboard
///
/// Aggregate statistics over the whole collection.
pub async fn dashboard(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rows = ReviewRepo::list_all(&state.pool, None).await?;

    let reviews: Vec<Review> = rows.into_iter().map(|r| r.into_review()).collect();
    Ok(Json(DataResponse {
        data: dashboard_stats(&reviews),
    }))
}

/// GET /api/v1/admin/export
///
/// The full collection in the portable document format, suitable for
/// re-import.
pub async fn export_reviews(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rows = ReviewRepo::list_all(&state.pool, None).await?;

    let documents: Vec<RawReview> = rows.into_iter().map(RawReview::from).collect();
    Ok(Json(DataResponse { data: documents }))
}

/// POST /api/v1/admin/import
///
/// Bulk import of portable documents. Slugs and ids are regenerated
/// from the titles, so identifiers from another installation never leak
/// in. Documents without a title and slug conflicts are skipped, not
/// errors; the summary reports both counts.
pub async fn import_reviews(
    admin: AdminUser,
    State(state): State<AppState>,
    Json(documents): Json<Vec<RawReview>>,
) -> AppResult<impl IntoResponse> {
    let mut imported = 0;
    let mut skipped = 0;

    for mut document in documents {
        document.id = None;
        document.slug = None;
        let review = review::normalize(document);

        if review.slug.is_empty() || review.title.is_empty() {
            skipped += 1;
            continue;
        }

        let record = ReviewRecord::from_review(review);
        match ReviewRepo::create(&state.pool, &record).await? {
            Some(_) => imported += 1,
            None => skipped += 1,
        }
    }

    tracing::info!(imported, skipped, admin = %admin.email, "Import finished");

    Ok(Json(DataResponse {
        data: ImportSummary { imported, skipped },
    }))
}
