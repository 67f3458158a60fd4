//! The review catalog orchestrator.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use gamehub_core::query::{self, FilterSpec, SortKey};
use gamehub_core::review::{self, Review};
use tokio::sync::RwLock;

use crate::fallback::FallbackStore;
use crate::source::ReviewSource;

/// Default debounce window for free-text search triggers.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Default bound on a remote fetch before the fallback engages.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on tracked session keys. Keys are caller-supplied, so the
/// registry must not grow without bound; clearing it only restarts the
/// counters, which at worst lets one already-stale run complete.
const MAX_SESSIONS: usize = 1024;

/// Timing knobs for the catalog.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Debounce window for [`ReviewCatalog::query_debounced`].
    pub debounce: Duration,
    /// Upper bound on a single remote fetch.
    pub fetch_timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// Result of one orchestrated query run.
///
/// `superseded` means a newer trigger was issued in the same session
/// while this run was in flight; its results have been discarded and
/// must not be rendered.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    /// Sequence number of the trigger that produced this outcome.
    pub seq: u64,
    /// Whether this run lost the last-trigger-wins race.
    pub superseded: bool,
    /// Ordered results. Empty when superseded.
    pub results: Vec<Review>,
}

/// Orchestrates remote fetch, local fallback, normalization, and the
/// filter/sort pipeline.
///
/// Last-trigger-wins supersession is scoped to a caller-supplied session
/// key, one counter per session: rapid triggers within a session discard
/// each other, triggers from different sessions never interact. A `None`
/// session gets a private counter and can never be superseded.
pub struct ReviewCatalog {
    source: Arc<dyn ReviewSource>,
    fallback: Option<Arc<dyn FallbackStore>>,
    cache: RwLock<Arc<Vec<Review>>>,
    sessions: Mutex<HashMap<String, Arc<AtomicU64>>>,
    config: CatalogConfig,
}

impl ReviewCatalog {
    /// Build a catalog over a remote source with an optional local
    /// fallback store.
    pub fn new(
        source: Arc<dyn ReviewSource>,
        fallback: Option<Arc<dyn FallbackStore>>,
        config: CatalogConfig,
    ) -> Self {
        Self {
            source,
            fallback,
            cache: RwLock::new(Arc::new(Vec::new())),
            sessions: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Trigger counter for a session, created on first use. `None` gets
    /// a fresh unregistered counter, so the run stands alone.
    fn session_counter(&self, session: Option<&str>) -> Arc<AtomicU64> {
        let Some(key) = session else {
            return Arc::new(AtomicU64::new(0));
        };

        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        if !sessions.contains_key(key) && sessions.len() >= MAX_SESSIONS {
            sessions.clear();
        }
        Arc::clone(
            sessions
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(AtomicU64::new(0))),
        )
    }

    /// Fetch the freshest collection.
    ///
    /// Prefers the remote source (bounded by the fetch timeout). On
    /// failure the previously fetched collection stands in; if there is
    /// none, the local fallback blob is loaded. Both failing yields an
    /// empty collection, which callers render as a "no data" state, never
    /// as an error.
    pub async fn collection(&self) -> Arc<Vec<Review>> {
        let fetched = tokio::time::timeout(self.config.fetch_timeout, self.source.fetch_all())
            .await
            .map_err(|_| crate::source::SourceError::Unavailable("fetch timed out".into()))
            .and_then(|r| r);

        match fetched {
            Ok(raw) => {
                if let Some(fallback) = &self.fallback {
                    // Best-effort refresh of the offline blob.
                    if let Err(e) = fallback.save(&raw).await {
                        tracing::warn!(error = %e, "Failed to refresh fallback blob");
                    }
                }

                let collection: Arc<Vec<Review>> =
                    Arc::new(raw.into_iter().map(review::normalize).collect());
                *self.cache.write().await = Arc::clone(&collection);
                collection
            }
            Err(e) => {
                tracing::warn!(error = %e, "Review source unavailable, serving fallback data");

                let cached = Arc::clone(&*self.cache.read().await);
                if !cached.is_empty() {
                    return cached;
                }

                let Some(fallback) = &self.fallback else {
                    return cached;
                };

                match fallback.load().await {
                    Ok(raw) => {
                        let collection: Arc<Vec<Review>> =
                            Arc::new(raw.into_iter().map(review::normalize).collect());
                        *self.cache.write().await = Arc::clone(&collection);
                        collection
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Fallback store unavailable");
                        cached
                    }
                }
            }
        }
    }

    /// Immediate query run (filter-control change path).
    ///
    /// Takes the session's next sequence number on call, superseding any
    /// pending debounced run in that session. If a newer trigger is
    /// issued while the fetch is in flight, the result is discarded and
    /// flagged.
    pub fn query(
        &self,
        session: Option<&str>,
        spec: FilterSpec,
        sort: SortKey,
    ) -> impl Future<Output = QueryOutcome> + Send + '_ {
        let counter = self.session_counter(session);
        let seq = counter.fetch_add(1, Ordering::SeqCst) + 1;

        async move {
            let collection = self.collection().await;

            if counter.load(Ordering::SeqCst) != seq {
                return QueryOutcome {
                    seq,
                    superseded: true,
                    results: Vec::new(),
                };
            }

            QueryOutcome {
                seq,
                superseded: false,
                results: query::query(&collection, &spec, sort),
            }
        }
    }

    /// Debounced query run (search-keystroke path).
    ///
    /// Sleeps out the debounce window first; a newer trigger issued in
    /// the same session during the window or during the fetch supersedes
    /// this run. At most one pipeline execution survives per window.
    pub fn query_debounced(
        &self,
        session: Option<&str>,
        spec: FilterSpec,
        sort: SortKey,
    ) -> impl Future<Output = QueryOutcome> + Send + '_ {
        let counter = self.session_counter(session);
        let seq = counter.fetch_add(1, Ordering::SeqCst) + 1;

        async move {
            tokio::time::sleep(self.config.debounce).await;

            if counter.load(Ordering::SeqCst) != seq {
                return QueryOutcome {
                    seq,
                    superseded: true,
                    results: Vec::new(),
                };
            }

            let collection = self.collection().await;

            if counter.load(Ordering::SeqCst) != seq {
                return QueryOutcome {
                    seq,
                    superseded: true,
                    results: Vec::new(),
                };
            }

            QueryOutcome {
                seq,
                superseded: false,
                results: query::query(&collection, &spec, sort),
            }
        }
    }

    /// The `n` most recent reviews.
    pub async fn latest(&self, n: usize) -> Vec<Review> {
        let collection = self.collection().await;
        query::latest(&collection, n)
    }

    /// All featured reviews, newest first. When nothing is flagged, the
    /// single latest review stands in so the home page is never empty
    /// while data exists.
    pub async fn featured(&self) -> Vec<Review> {
        let collection = self.collection().await;

        let mut featured: Vec<Review> =
            collection.iter().filter(|r| r.featured).cloned().collect();

        if featured.is_empty() {
            return query::latest(&collection, 1);
        }

        featured.sort_by(|a, b| b.date.cmp(&a.date));
        featured
    }

    /// Look up a single review by slug. `None` is the explicit
    /// "not found" result.
    pub async fn find(&self, slug: &str) -> Option<Review> {
        let collection = self.collection().await;
        collection.iter().find(|r| r.slug == slug).cloned()
    }

    /// Related reviews for a slug: the detail-page companion selection.
    pub async fn related(&self, current: &Review) -> Vec<Review> {
        let collection = self.collection().await;
        gamehub_core::present::related(current, &collection)
            .into_iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use gamehub_core::review::RawReview;

    use super::*;
    use crate::fallback::FallbackError;
    use crate::source::SourceError;

    fn raw(title: &str, date: &str) -> RawReview {
        RawReview {
            title: Some(title.to_string()),
            date: Some(date.to_string()),
            rating: Some(8),
            ..Default::default()
        }
    }

    /// Source serving a fixed collection, optionally after a delay.
    struct FakeSource {
        collection: Vec<RawReview>,
        delay: Duration,
        fetches: AtomicUsize,
    }

    impl FakeSource {
        fn new(collection: Vec<RawReview>) -> Self {
            Self {
                collection,
                delay: Duration::ZERO,
                fetches: AtomicUsize::new(0),
            }
        }

        fn slow(collection: Vec<RawReview>, delay: Duration) -> Self {
            Self {
                collection,
                delay,
                fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ReviewSource for FakeSource {
        async fn fetch_all(&self) -> Result<Vec<RawReview>, SourceError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(self.collection.clone())
        }
    }

    /// Source that always fails.
    struct DownSource;

    #[async_trait]
    impl ReviewSource for DownSource {
        async fn fetch_all(&self) -> Result<Vec<RawReview>, SourceError> {
            Err(SourceError::Unavailable("connection refused".into()))
        }
    }

    /// In-memory fallback store recording saves.
    #[derive(Default)]
    struct MemoryStore {
        blob: Mutex<Vec<RawReview>>,
        saves: AtomicUsize,
    }

    #[async_trait]
    impl FallbackStore for MemoryStore {
        async fn load(&self) -> Result<Vec<RawReview>, FallbackError> {
            Ok(self.blob.lock().unwrap().clone())
        }

        async fn save(&self, collection: &[RawReview]) -> Result<(), FallbackError> {
            *self.blob.lock().unwrap() = collection.to_vec();
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn catalog_with(
        source: Arc<dyn ReviewSource>,
        fallback: Option<Arc<dyn FallbackStore>>,
    ) -> ReviewCatalog {
        ReviewCatalog::new(source, fallback, CatalogConfig::default())
    }

    #[tokio::test]
    async fn remote_success_populates_cache_and_fallback_blob() {
        let store = Arc::new(MemoryStore::default());
        let catalog = catalog_with(
            Arc::new(FakeSource::new(vec![raw("Hades", "2020-09-17")])),
            Some(Arc::clone(&store) as Arc<dyn FallbackStore>),
        );

        let collection = catalog.collection().await;

        assert_eq!(collection.len(), 1);
        assert_eq!(collection[0].slug, "hades");
        assert_eq!(store.saves.load(Ordering::SeqCst), 1);
        assert_eq!(store.blob.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn fallback_engages_when_source_is_down() {
        let store = Arc::new(MemoryStore::default());
        *store.blob.lock().unwrap() = vec![raw("Cached Game", "2022-01-01")];

        let catalog = catalog_with(
            Arc::new(DownSource),
            Some(Arc::clone(&store) as Arc<dyn FallbackStore>),
        );

        let collection = catalog.collection().await;

        assert_eq!(collection.len(), 1);
        assert_eq!(collection[0].title, "Cached Game");
    }

    #[tokio::test]
    async fn both_sources_down_yields_empty_not_error() {
        let catalog = catalog_with(Arc::new(DownSource), None);

        assert!(catalog.collection().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_timeout_degrades_to_fallback() {
        let store = Arc::new(MemoryStore::default());
        *store.blob.lock().unwrap() = vec![raw("Offline Copy", "2021-05-01")];

        let catalog = ReviewCatalog::new(
            Arc::new(FakeSource::slow(
                vec![raw("Never Arrives", "2024-01-01")],
                Duration::from_secs(60),
            )),
            Some(Arc::clone(&store) as Arc<dyn FallbackStore>),
            CatalogConfig::default(),
        );

        let collection = catalog.collection().await;

        assert_eq!(collection.len(), 1);
        assert_eq!(collection[0].title, "Offline Copy");
    }

    #[tokio::test]
    async fn cached_collection_outranks_fallback_blob_after_outage() {
        // First fetch succeeds and fills the cache, then the source dies.
        let source = Arc::new(FakeSource::new(vec![raw("Live Data", "2024-02-02")]));
        let store = Arc::new(MemoryStore::default());
        let catalog = ReviewCatalog::new(
            Arc::clone(&source) as Arc<dyn ReviewSource>,
            Some(Arc::clone(&store) as Arc<dyn FallbackStore>),
            CatalogConfig::default(),
        );
        catalog.collection().await;

        let catalog_down = ReviewCatalog {
            source: Arc::new(DownSource),
            fallback: Some(store),
            cache: RwLock::new(Arc::clone(&*catalog.cache.read().await)),
            sessions: Mutex::new(HashMap::new()),
            config: CatalogConfig::default(),
        };

        let collection = catalog_down.collection().await;
        assert_eq!(collection[0].title, "Live Data");
    }

    #[tokio::test(start_paused = true)]
    async fn later_debounced_trigger_supersedes_earlier_one() {
        let catalog = catalog_with(
            Arc::new(FakeSource::new(vec![raw("Hades", "2020-09-17")])),
            None,
        );

        // Both triggers land inside one debounce window; sequence numbers
        // are taken synchronously at call time, so A is issued before B.
        let a = catalog.query_debounced(
            Some("ui"),
            FilterSpec {
                search: Some("ha".into()),
                ..Default::default()
            },
            SortKey::DateDesc,
        );
        let b = catalog.query_debounced(
            Some("ui"),
            FilterSpec {
                search: Some("hades".into()),
                ..Default::default()
            },
            SortKey::DateDesc,
        );

        let (outcome_a, outcome_b) = tokio::join!(a, b);

        assert!(outcome_a.superseded);
        assert!(outcome_a.results.is_empty());
        assert!(!outcome_b.superseded);
        assert_eq!(outcome_b.results.len(), 1);
        assert!(outcome_a.seq < outcome_b.seq);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_fetch_result_is_discarded_when_new_trigger_arrives() {
        // Query A's fetch takes 5s; B is triggered immediately after A.
        // Even though A resolves later, only B's result may be rendered.
        let catalog = catalog_with(
            Arc::new(FakeSource::slow(
                vec![raw("Hades", "2020-09-17")],
                Duration::from_secs(5),
            )),
            None,
        );

        let a = catalog.query(Some("ui"), FilterSpec::default(), SortKey::DateDesc);
        let b = catalog.query(Some("ui"), FilterSpec::default(), SortKey::DateDesc);

        let (outcome_a, outcome_b) = tokio::join!(a, b);

        assert!(outcome_a.superseded);
        assert!(!outcome_b.superseded);
        assert_eq!(outcome_b.results.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn triggers_in_different_sessions_never_interfere() {
        let catalog = catalog_with(
            Arc::new(FakeSource::new(vec![raw("Hades", "2020-09-17")])),
            None,
        );

        // One client is mid-debounce on a search while another issues a
        // plain listing; both runs must survive.
        let a = catalog.query_debounced(
            Some("client-a"),
            FilterSpec {
                search: Some("hades".into()),
                ..Default::default()
            },
            SortKey::DateDesc,
        );
        let b = catalog.query(Some("client-b"), FilterSpec::default(), SortKey::DateDesc);

        let (outcome_a, outcome_b) = tokio::join!(a, b);

        assert!(!outcome_a.superseded);
        assert_eq!(outcome_a.results.len(), 1);
        assert!(!outcome_b.superseded);
        assert_eq!(outcome_b.results.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn sessionless_triggers_stand_alone() {
        let catalog = catalog_with(
            Arc::new(FakeSource::new(vec![raw("Hades", "2020-09-17")])),
            None,
        );

        let a = catalog.query_debounced(
            None,
            FilterSpec {
                search: Some("hades".into()),
                ..Default::default()
            },
            SortKey::DateDesc,
        );
        let b = catalog.query_debounced(
            None,
            FilterSpec {
                search: Some("hades".into()),
                ..Default::default()
            },
            SortKey::DateDesc,
        );

        let (outcome_a, outcome_b) = tokio::join!(a, b);

        assert!(!outcome_a.superseded);
        assert!(!outcome_b.superseded);
    }

    #[tokio::test]
    async fn single_query_is_not_superseded() {
        let catalog = catalog_with(
            Arc::new(FakeSource::new(vec![
                raw("Hades", "2020-09-17"),
                raw("Celeste", "2018-01-25"),
            ])),
            None,
        );

        let outcome = catalog
            .query(Some("ui"), FilterSpec::default(), SortKey::DateDesc)
            .await;

        assert!(!outcome.superseded);
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.results[0].slug, "hades");
    }

    #[tokio::test]
    async fn latest_is_sorted_prefix() {
        let catalog = catalog_with(
            Arc::new(FakeSource::new(vec![
                raw("Older", "2020-01-01"),
                raw("Newest", "2024-01-01"),
                raw("Middle", "2022-01-01"),
            ])),
            None,
        );

        let latest = catalog.latest(2).await;
        let titles: Vec<&str> = latest.iter().map(|r| r.title.as_str()).collect();

        assert_eq!(titles, vec!["Newest", "Middle"]);
    }

    #[tokio::test]
    async fn featured_falls_back_to_latest_when_none_flagged() {
        let catalog = catalog_with(
            Arc::new(FakeSource::new(vec![
                raw("Older", "2020-01-01"),
                raw("Newest", "2024-01-01"),
            ])),
            None,
        );

        let featured = catalog.featured().await;

        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].title, "Newest");
    }

    #[tokio::test]
    async fn featured_returns_all_flagged_newest_first() {
        let mut a = raw("First Feature", "2023-01-01");
        a.featured = true;
        let mut b = raw("Second Feature", "2024-01-01");
        b.featured = true;

        let catalog = catalog_with(
            Arc::new(FakeSource::new(vec![a, raw("Plain", "2024-06-01"), b])),
            None,
        );

        let featured = catalog.featured().await;
        let titles: Vec<&str> = featured.iter().map(|r| r.title.as_str()).collect();

        assert_eq!(titles, vec!["Second Feature", "First Feature"]);
    }

    #[tokio::test]
    async fn find_reports_absence_explicitly() {
        let catalog = catalog_with(
            Arc::new(FakeSource::new(vec![raw("Hades", "2020-09-17")])),
            None,
        );

        assert!(catalog.find("hades").await.is_some());
        assert!(catalog.find("does-not-exist").await.is_none());
    }
}
