//! Remote review source abstraction.

use async_trait::async_trait;
use gamehub_core::review::RawReview;

/// Errors from a remote review source.
///
/// These never reach end users: the catalog degrades to the fallback
/// store and logs an advisory instead.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source could not be reached or the query failed.
    #[error("review source unavailable: {0}")]
    Unavailable(String),
}

/// A remote store that can produce the full review collection.
///
/// Implemented by the Postgres adapter in `gamehub-db`; tests use
/// in-memory fakes.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// Fetch the full collection, newest first where the source supports
    /// ordering. Record-level malformation is fine; normalization happens
    /// in the catalog.
    async fn fetch_all(&self) -> Result<Vec<RawReview>, SourceError>;
}
