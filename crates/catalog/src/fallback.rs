//! Local persisted fallback store.
//!
//! Holds the full collection as one serialized JSON blob. Read only when
//! the primary source is unreachable; refreshed best-effort after every
//! successful remote fetch so the blob stays reasonably current.

use std::path::PathBuf;

use async_trait::async_trait;
use gamehub_core::review::RawReview;

/// Errors from the fallback store. Like source errors these are advisory
/// only and never surface to users.
#[derive(Debug, thiserror::Error)]
pub enum FallbackError {
    #[error("fallback store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("fallback blob is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Key-based get/set of the full collection as one blob.
#[async_trait]
pub trait FallbackStore: Send + Sync {
    /// Load the stored collection. An absent blob is an empty collection,
    /// not an error.
    async fn load(&self) -> Result<Vec<RawReview>, FallbackError>;

    /// Replace the stored collection.
    async fn save(&self, collection: &[RawReview]) -> Result<(), FallbackError>;
}

/// File-backed [`FallbackStore`] writing one JSON document.
pub struct FileFallbackStore {
    path: PathBuf,
}

impl FileFallbackStore {
    /// Store backed by the given file path. Parent directories must exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FallbackStore for FileFallbackStore {
    async fn load(&self) -> Result<Vec<RawReview>, FallbackError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn save(&self, collection: &[RawReview]) -> Result<(), FallbackError> {
        let bytes = serde_json::to_vec(collection)?;

        // Write-then-rename so a crash mid-write never leaves a torn blob.
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn sample() -> Vec<RawReview> {
        vec![RawReview {
            title: Some("Outer Wilds".into()),
            rating: Some(10),
            ..Default::default()
        }]
    }

    #[tokio::test]
    async fn missing_blob_loads_as_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileFallbackStore::new(dir.path().join("reviews.json"));

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileFallbackStore::new(dir.path().join("reviews.json"));

        store.save(&sample()).await.unwrap();
        let loaded = store.load().await.unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title.as_deref(), Some("Outer Wilds"));
    }

    #[tokio::test]
    async fn corrupt_blob_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let store = FileFallbackStore::new(path);
        assert_matches!(store.load().await, Err(FallbackError::Corrupt(_)));
    }

    #[tokio::test]
    async fn save_overwrites_previous_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileFallbackStore::new(dir.path().join("reviews.json"));

        store.save(&sample()).await.unwrap();
        store.save(&[]).await.unwrap();

        assert!(store.load().await.unwrap().is_empty());
    }
}
