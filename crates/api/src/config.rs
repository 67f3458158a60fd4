use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Path of the offline fallback blob for the review catalog.
    pub fallback_path: PathBuf,
    /// Game-metadata API settings.
    pub metadata: MetadataConfig,
    /// JWT token configuration (secret, admin allowlist, expiry).
    pub jwt: JwtConfig,
}

/// Connection settings for the game-metadata API.
#[derive(Debug, Clone)]
pub struct MetadataConfig {
    /// Base URL, no trailing slash.
    pub base_url: String,
    /// API key appended to every request.
    pub api_key: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                         |
    /// |------------------------|---------------------------------|
    /// | `HOST`                 | `0.0.0.0`                       |
    /// | `PORT`                 | `3000`                          |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`         |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                            |
    /// | `FALLBACK_STORE_PATH`  | `data/reviews-fallback.json`    |
    /// | `METADATA_API_URL`     | `https://api.rawg.io/api`       |
    /// | `METADATA_API_KEY`     | (empty)                         |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let fallback_path = PathBuf::from(
            std::env::var("FALLBACK_STORE_PATH")
                .unwrap_or_else(|_| "data/reviews-fallback.json".into()),
        );

        let metadata = MetadataConfig {
            base_url: std::env::var("METADATA_API_URL")
                .unwrap_or_else(|_| "https://api.rawg.io/api".into()),
            api_key: std::env::var("METADATA_API_KEY").unwrap_or_default(),
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            fallback_path,
            metadata,
            jwt,
        }
    }
}
