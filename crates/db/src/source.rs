//! Catalog source adapter backed by the `reviews` table.

use async_trait::async_trait;
use gamehub_catalog::source::{ReviewSource, SourceError};
use gamehub_core::review::RawReview;

use crate::repositories::ReviewRepo;
use crate::DbPool;

/// [`ReviewSource`] reading the full collection from Postgres.
pub struct PgReviewSource {
    pool: DbPool,
}

impl PgReviewSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewSource for PgReviewSource {
    async fn fetch_all(&self) -> Result<Vec<RawReview>, SourceError> {
        let rows = ReviewRepo::list_all(&self.pool, None)
            .await
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;

        Ok(rows.into_iter().map(RawReview::from).collect())
    }
}
