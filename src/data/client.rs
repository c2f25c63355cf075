//! TMDB API client
//!
//! Wraps the TMDB v3 REST API with an in-memory response cache. Every endpoint
//! builds its request URL, picks a cache category, and goes through
//! `fetch_with_cache`, which serves fresh entries without touching the network
//! and otherwise performs a single timeout-bounded GET.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error, warn};
use url::form_urlencoded;

use super::{
    ApiConfiguration, Credits, ImageSize, MovieDetails, MovieResponse, TimeWindow, VideoResponse,
};
use crate::cache::{CacheCategory, CacheTtls, ResponseCache};
use crate::clock::Clock;
use crate::config::Config;

/// Returned by `image_url` when a movie has no image
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Errors that can occur when talking to TMDB
///
/// None of these ever populate the cache.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response within the configured timeout; the request was cancelled
    #[error("Request timeout after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// TMDB answered with a non-2xx status
    #[error("TMDB API error: {status}")]
    Upstream { status: u16 },

    /// The transport failed before a response arrived
    #[error(transparent)]
    Network(#[from] reqwest::Error),

    /// The body did not match the expected response shape
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Whether repeating the same request might succeed
    ///
    /// Timeouts, rate limiting (429), server errors (5xx) and transport
    /// failures are worth retrying; other statuses and decode errors are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Timeout(_) | ApiError::Network(_) => true,
            ApiError::Upstream { status } => *status == 429 || (500..600).contains(status),
            ApiError::Decode { .. } => false,
        }
    }

    /// HTTP status for upstream errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Upstream { status } => Some(*status),
            _ => None,
        }
    }
}

/// Client for the TMDB API with per-category response caching
///
/// Clones share the same cache and connection pool.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http_client: Client,
    api_base_url: String,
    image_base_url: String,
    auth_header: String,
    timeout: Duration,
    cache_ttls: CacheTtls,
    cache: Arc<ResponseCache>,
}

impl TmdbClient {
    /// Create a new TmdbClient from configuration
    pub fn new(config: Config) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create a new TmdbClient with a custom HTTP client
    pub fn with_client(config: Config, http_client: Client) -> Self {
        Self {
            http_client,
            auth_header: config.auth_header(),
            api_base_url: config.api_base_url,
            image_base_url: config.image_base_url,
            timeout: config.timeout,
            cache_ttls: config.cache_ttls,
            cache: Arc::new(ResponseCache::new()),
        }
    }

    /// Replace the time source used for cache expiry
    ///
    /// Starts a fresh, empty cache driven by `clock`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.cache = Arc::new(ResponseCache::with_clock(clock));
        self
    }

    /// The response cache backing this client
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Drop every cached response
    pub fn clear_cache(&self) {
        debug!(entries = self.cache.len(), "clearing response cache");
        self.cache.clear();
    }

    /// Fetch `url`, serving it from cache while the entry is fresh
    ///
    /// Freshness is judged against the TTL of `category`. A successful
    /// response is decoded into `T` and stored under `url`, replacing any
    /// earlier entry. Failures are logged and returned without touching the
    /// cache. Concurrent misses for the same URL each go to the network.
    pub async fn fetch_with_cache<T>(&self, url: &str, category: CacheCategory) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let ttl_ms = self.cache_ttls.ttl_ms(category);

        if let Some(cached) = self.cache.read::<T>(url, ttl_ms) {
            if !cached.is_expired {
                debug!(url, %category, "cache hit");
                return Ok(cached.data);
            }
            debug!(url, %category, stored_at_ms = cached.stored_at_ms, "cache entry expired");
        } else {
            debug!(url, %category, "cache miss");
        }

        let data: T = self.fetch(url).await?;
        self.cache.write(url, data.clone());
        Ok(data)
    }

    /// One GET to `url`, bounded by the configured timeout, decoded as `T`
    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let text = match tokio::time::timeout(self.timeout, self.send(url)).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(url, timeout_ms = self.timeout.as_millis() as u64, "TMDB request timed out");
                return Err(ApiError::Timeout(self.timeout));
            }
        };

        serde_json::from_str(&text).map_err(|source| {
            error!(url, error = %source, "TMDB response did not match expected shape");
            ApiError::Decode {
                url: url.to_string(),
                source,
            }
        })
    }

    /// Sends the request and reads the body; dropped on timeout
    async fn send(&self, url: &str) -> Result<String, ApiError> {
        let response = self
            .http_client
            .get(url)
            .header(header::AUTHORIZATION, &self.auth_header)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!(url, error = %e, "TMDB API request failed");
                ApiError::Network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "TMDB API returned error status");
            return Err(ApiError::Upstream {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| {
            error!(url, error = %e, "failed to read TMDB response body");
            ApiError::Network(e)
        })
    }

    fn endpoint(&self, path_and_query: &str) -> String {
        format!("{}{}", self.api_base_url, path_and_query)
    }

    /// API-wide settings such as image base URLs and size lists
    pub async fn configuration(&self) -> Result<ApiConfiguration, ApiError> {
        self.fetch_with_cache(&self.endpoint("/configuration"), CacheCategory::Lists)
            .await
    }

    pub async fn popular_movies(&self, page: u32) -> Result<MovieResponse, ApiError> {
        self.fetch_with_cache(
            &self.endpoint(&format!("/movie/popular?page={}", page)),
            CacheCategory::Lists,
        )
        .await
    }

    pub async fn trending_movies(
        &self,
        window: TimeWindow,
        page: u32,
    ) -> Result<MovieResponse, ApiError> {
        self.fetch_with_cache(
            &self.endpoint(&format!("/trending/movie/{}?page={}", window.as_str(), page)),
            CacheCategory::Lists,
        )
        .await
    }

    pub async fn top_rated_movies(&self, page: u32) -> Result<MovieResponse, ApiError> {
        self.fetch_with_cache(
            &self.endpoint(&format!("/movie/top_rated?page={}", page)),
            CacheCategory::Lists,
        )
        .await
    }

    pub async fn now_playing_movies(&self, page: u32) -> Result<MovieResponse, ApiError> {
        self.fetch_with_cache(
            &self.endpoint(&format!("/movie/now_playing?page={}", page)),
            CacheCategory::Lists,
        )
        .await
    }

    pub async fn upcoming_movies(&self, page: u32) -> Result<MovieResponse, ApiError> {
        self.fetch_with_cache(
            &self.endpoint(&format!("/movie/upcoming?page={}", page)),
            CacheCategory::Lists,
        )
        .await
    }

    /// Search movies by title
    ///
    /// The query is percent-encoded once, so spaces become `%20` and `&`
    /// becomes `%26`.
    pub async fn search_movies(&self, query: &str, page: u32) -> Result<MovieResponse, ApiError> {
        self.fetch_with_cache(
            &self.endpoint(&format!(
                "/search/movie?query={}&page={}",
                encode_query_value(query),
                page
            )),
            CacheCategory::Search,
        )
        .await
    }

    pub async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails, ApiError> {
        self.fetch_with_cache(
            &self.endpoint(&format!("/movie/{}", movie_id)),
            CacheCategory::Details,
        )
        .await
    }

    pub async fn movie_credits(&self, movie_id: u64) -> Result<Credits, ApiError> {
        self.fetch_with_cache(
            &self.endpoint(&format!("/movie/{}/credits", movie_id)),
            CacheCategory::Default,
        )
        .await
    }

    pub async fn similar_movies(&self, movie_id: u64, page: u32) -> Result<MovieResponse, ApiError> {
        self.fetch_with_cache(
            &self.endpoint(&format!("/movie/{}/similar?page={}", movie_id, page)),
            CacheCategory::Default,
        )
        .await
    }

    pub async fn recommended_movies(
        &self,
        movie_id: u64,
        page: u32,
    ) -> Result<MovieResponse, ApiError> {
        self.fetch_with_cache(
            &self.endpoint(&format!("/movie/{}/recommendations?page={}", movie_id, page)),
            CacheCategory::Default,
        )
        .await
    }

    pub async fn movie_videos(&self, movie_id: u64) -> Result<VideoResponse, ApiError> {
        self.fetch_with_cache(
            &self.endpoint(&format!("/movie/{}/videos", movie_id)),
            CacheCategory::Default,
        )
        .await
    }

    /// Full image URL for `path` at `size`, or the placeholder when there is no path
    pub fn image_url(&self, path: Option<&str>, size: ImageSize) -> String {
        build_image_url(&self.image_base_url, path, size)
    }
}

/// Joins an image base URL, size token and TMDB image path
pub fn build_image_url(image_base_url: &str, path: Option<&str>, size: ImageSize) -> String {
    match path {
        Some(path) if !path.is_empty() => format!("{}/{}{}", image_base_url, size.as_str(), path),
        _ => PLACEHOLDER_IMAGE.to_string(),
    }
}

/// Percent-encodes a single query value
///
/// `form_urlencoded` writes spaces as `+` and escapes a literal `+` as `%2B`,
/// so every remaining `+` is a space and can be rewritten as `%20`.
pub fn encode_query_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
