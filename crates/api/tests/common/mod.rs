use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use gamehub_api::auth::jwt::{generate_access_token, JwtConfig};
use gamehub_api::config::{MetadataConfig, ServerConfig};
use gamehub_api::router::build_app_router;
use gamehub_api::state::AppState;
use gamehub_catalog::{CatalogConfig, ReviewCatalog};
use gamehub_db::models::review::ReviewRecord;
use gamehub_db::repositories::ReviewRepo;
use gamehub_db::source::PgReviewSource;
use gamehub_metadata::GameMetadataClient;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// The metadata base URL points at an unroutable port so any test that
/// accidentally reaches upstream fails fast instead of hitting the
/// network.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        fallback_path: PathBuf::from("data/reviews-fallback.json"),
        metadata: MetadataConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            api_key: String::new(),
        },
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            admin_emails: vec!["admin@gamehub.com".to_string()],
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
///
/// This mirrors the router construction in `main.rs` (minus the file
/// fallback store) so integration tests exercise the same middleware
/// stack that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let catalog = Arc::new(ReviewCatalog::new(
        Arc::new(PgReviewSource::new(pool.clone())),
        None,
        CatalogConfig::default(),
    ));

    let metadata = Arc::new(GameMetadataClient::new(
        config.metadata.base_url.clone(),
        config.metadata.api_key.clone(),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        catalog,
        metadata,
    };

    build_app_router(state, &config)
}

/// A valid bearer token for the allowlisted test admin.
#[allow(dead_code)]
pub fn admin_token() -> String {
    generate_access_token("admin@gamehub.com", &test_config().jwt).unwrap()
}

/// A valid bearer token for an email NOT on the allowlist.
#[allow(dead_code)]
pub fn reader_token() -> String {
    generate_access_token("reader@gamehub.com", &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a request with an optional bearer token and optional JSON body.
#[allow(dead_code)]
pub async fn request(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a status and return the parsed body.
#[allow(dead_code)]
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Seeding helpers
// ---------------------------------------------------------------------------

/// A baseline write record; tests override individual fields.
#[allow(dead_code)]
pub fn record(slug: &str, title: &str, date: &str) -> ReviewRecord {
    ReviewRecord {
        slug: slug.to_string(),
        title: title.to_string(),
        genre: "RPG".to_string(),
        platforms: vec!["PC".to_string()],
        rating: 8,
        author: "Alex".to_string(),
        review_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        featured: false,
        cover_image: "https://example.com/cover.jpg".to_string(),
        header_image: "https://example.com/header.jpg".to_string(),
        tags: vec!["Open World".to_string()],
        excerpt: "A short excerpt.".to_string(),
        content: "<p>Full body.</p>".to_string(),
        author_avatar: "https://example.com/avatar.jpg".to_string(),
    }
}

/// Insert a record directly through the repository.
#[allow(dead_code)]
pub async fn seed(pool: &PgPool, record: &ReviewRecord) {
    ReviewRepo::create(pool, record)
        .await
        .unwrap()
        .expect("seed insert should not conflict");
}
