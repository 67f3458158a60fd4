//! HTTP client for the game-metadata API.

use serde::{Deserialize, Serialize};

/// Results per search page. Matches what the admin search dropdown shows.
const SEARCH_PAGE_SIZE: u8 = 8;

/// Minimum query length before a search is attempted.
const MIN_QUERY_LEN: usize = 2;

/// Errors from the metadata API layer.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("metadata API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/* --------------------------------------------------------------------------
Wire types
-------------------------------------------------------------------------- */

/// One entry of a game search result page. `Serialize` because search
/// results are passed through to the admin UI as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSummary {
    pub id: i64,
    pub name: String,
    /// Release date, `YYYY-MM-DD`.
    #[serde(default)]
    pub released: Option<String>,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub genres: Vec<GenreRef>,
    #[serde(default)]
    pub platforms: Vec<PlatformRef>,
}

/// Full detail payload for a single game.
#[derive(Debug, Clone, Deserialize)]
pub struct GameDetail {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub released: Option<String>,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub genres: Vec<GenreRef>,
    #[serde(default)]
    pub platforms: Vec<PlatformRef>,
    #[serde(default)]
    pub tags: Vec<TagRef>,
    #[serde(default)]
    pub developers: Vec<NamedRef>,
    #[serde(default)]
    pub publishers: Vec<NamedRef>,
    #[serde(default)]
    pub description_raw: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreRef {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformRef {
    pub platform: NamedSlugRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedSlugRef {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagRef {
    pub name: String,
    /// Tag language code; only `"eng"` tags are used.
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    results: Vec<GameSummary>,
}

/* --------------------------------------------------------------------------
Client
-------------------------------------------------------------------------- */

/// Client for a RAWG-compatible metadata API.
pub struct GameMetadataClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GameMetadataClient {
    /// Create a client.
    ///
    /// * `base_url` - e.g. `https://api.rawg.io/api` (no trailing slash).
    /// * `api_key`  - API key appended to every request.
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Search games by name. Queries shorter than two characters return
    /// an empty page without hitting the network.
    pub async fn search(&self, query: &str) -> Result<Vec<GameSummary>, MetadataError> {
        if query.len() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .get(format!("{}/games", self.base_url))
            .query(&[
                ("key", self.api_key.as_str()),
                ("search", query),
                ("page_size", &SEARCH_PAGE_SIZE.to_string()),
            ])
            .send()
            .await?;

        let page: SearchPage = Self::parse_response(response).await?;
        Ok(page.results)
    }

    /// Fetch full details for a game. `None` when the game is unknown.
    pub async fn details(&self, game_id: i64) -> Result<Option<GameDetail>, MetadataError> {
        let response = self
            .client
            .get(format!("{}/games/{game_id}", self.base_url))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        Ok(Some(Self::parse_response(response).await?))
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, MetadataError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MetadataError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
