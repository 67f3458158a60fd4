use std::sync::Arc;

use gamehub_catalog::ReviewCatalog;
use gamehub_metadata::GameMetadataClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: gamehub_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Review catalog orchestrator (fetch, fallback, query pipeline).
    pub catalog: Arc<ReviewCatalog>,
    /// Game-metadata API client for admin auto-fill.
    pub metadata: Arc<GameMetadataClient>,
}
