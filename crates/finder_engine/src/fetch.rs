use std::time::Duration;

use finder_core::Movie;
use finder_logging::finder_debug;
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use url::Url;

use crate::{ApiConfig, EngineError, FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// `None` waits indefinitely.
    pub connect_timeout: Option<Duration>,
    /// `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            request_timeout: None,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Read access to the remote movie catalog.
#[async_trait::async_trait]
pub trait Catalog: Send + Sync {
    /// One page of the popularity-sorted browse list.
    async fn discover(&self, page: u32) -> Result<Vec<Movie>, FetchError>;

    /// Movies whose title matches `term`.
    async fn search(&self, term: &str) -> Result<Vec<Movie>, FetchError>;
}

#[derive(Debug, Deserialize)]
struct ResultsPage {
    results: Vec<Movie>,
}

/// `Catalog` backed by the TMDB v3 HTTP API.
#[derive(Debug, Clone)]
pub struct TmdbCatalog {
    config: ApiConfig,
    settings: FetchSettings,
    client: reqwest::Client,
}

impl TmdbCatalog {
    pub fn new(config: ApiConfig, settings: FetchSettings) -> Result<Self, EngineError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_token))
            .map_err(|_| EngineError::InvalidCredential)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))?;

        Ok(Self {
            config,
            settings,
            client,
        })
    }

    pub fn discover_url(&self, page: u32) -> Url {
        let mut url = self.config.endpoint("discover/movie");
        url.query_pairs_mut()
            .append_pair("sort_by", "popularity.desc")
            .append_pair("page", &page.to_string());
        url
    }

    pub fn search_url(&self, term: &str) -> Url {
        let mut url = self.config.endpoint("search/movie");
        url.query_pairs_mut().append_pair("query", term);
        url
    }

    async fn fetch_results(&self, url: Url) -> Result<Vec<Movie>, FetchError> {
        finder_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        let page: ResultsPage = serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
        Ok(page.results)
    }
}

#[async_trait::async_trait]
impl Catalog for TmdbCatalog {
    async fn discover(&self, page: u32) -> Result<Vec<Movie>, FetchError> {
        self.fetch_results(self.discover_url(page)).await
    }

    async fn search(&self, term: &str) -> Result<Vec<Movie>, FetchError> {
        self.fetch_results(self.search_url(term)).await
    }
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return FetchError::new(FailureKind::InvalidUrl, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
