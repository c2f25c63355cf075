//! Configuration loading
//!
//! Reads TMDB connection settings and cache TTLs from environment variables,
//! validates them, and hands back an immutable `Config`.

use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::cache::CacheTtls;

/// Default request timeout in milliseconds
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Accepted request timeout range in milliseconds
const TIMEOUT_RANGE_MS: std::ops::RangeInclusive<u64> = 1_000..=60_000;

/// Shortest token we accept as a plausible TMDB read-access token
const MIN_TOKEN_LEN: usize = 10;

/// Errors raised while loading configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A base URL does not parse
    #[error("Invalid URL in {var}: '{value}' (e.g. https://api.themoviedb.org/3)")]
    InvalidUrl { var: &'static str, value: String },

    /// The access token is too short to be real
    #[error("Invalid TMDB access token format")]
    InvalidToken,

    /// The request timeout is outside the accepted range
    #[error("Invalid API timeout value: {0}ms. Timeout should be between 1000ms and 60000ms")]
    InvalidTimeout(u64),
}

/// Client configuration, fixed for the lifetime of a `TmdbClient`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL for data requests, without trailing slash
    pub api_base_url: String,
    /// Base URL for image assets, without trailing slash
    pub image_base_url: String,
    /// TMDB v4 read-access token
    pub access_token: String,
    /// Upper bound on a single request
    pub timeout: Duration,
    /// TTL per cache category
    pub cache_ttls: CacheTtls,
}

impl Config {
    /// Creates a Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `TMDB_API_BASE_URL` - Data API base URL (required)
    /// - `TMDB_ACCESS_TOKEN` - Bearer token (required)
    /// - `TMDB_IMAGE_BASE_URL` - Image CDN base URL (required)
    /// - `TMDB_API_TIMEOUT_MS` - Request timeout (default: 10000)
    /// - `CACHE_TTL_MS` - Default category TTL (default: 300000)
    /// - `CACHE_SEARCH_TTL_MS` - Search TTL (default: 120000)
    /// - `CACHE_DETAILS_TTL_MS` - Details TTL (default: 900000)
    /// - `CACHE_LISTS_TTL_MS` - Lists TTL (default: 300000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable lookup
    ///
    /// Values are trimmed and blank values count as unset. Optional numbers
    /// are read from their leading digits (`"15000ms"` is 15000); values
    /// without any fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |name: &'static str| get(name).ok_or(ConfigError::MissingVar(name));
        let number = |name: &str, default: u64| {
            get(name)
                .and_then(|v| leading_number(&v))
                .unwrap_or(default)
        };

        let defaults = CacheTtls::default();
        let config = Self {
            api_base_url: required("TMDB_API_BASE_URL")?,
            access_token: required("TMDB_ACCESS_TOKEN")?,
            image_base_url: required("TMDB_IMAGE_BASE_URL")?,
            timeout: Duration::from_millis(number("TMDB_API_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)),
            cache_ttls: CacheTtls {
                default_ms: number("CACHE_TTL_MS", defaults.default_ms),
                search_ms: number("CACHE_SEARCH_TTL_MS", defaults.search_ms),
                details_ms: number("CACHE_DETAILS_TTL_MS", defaults.details_ms),
                lists_ms: number("CACHE_LISTS_TTL_MS", defaults.lists_ms),
            },
        };

        config.validated()
    }

    /// Checks URLs, token and timeout; strips trailing slashes from base URLs
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        check_url("TMDB_API_BASE_URL", &self.api_base_url)?;
        check_url("TMDB_IMAGE_BASE_URL", &self.image_base_url)?;

        if self.access_token.len() < MIN_TOKEN_LEN {
            return Err(ConfigError::InvalidToken);
        }

        let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
        if !TIMEOUT_RANGE_MS.contains(&timeout_ms) {
            return Err(ConfigError::InvalidTimeout(timeout_ms));
        }

        self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
        self.image_base_url = self.image_base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Value for the `Authorization` header
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// One-line description with the token redacted, for logs
    pub fn summary(&self) -> String {
        let t = &self.cache_ttls;
        format!(
            "api_base_url={}, image_base_url={}, timeout={}ms, access_token={}, ttl(default={}ms, search={}ms, details={}ms, lists={}ms)",
            self.api_base_url,
            self.image_base_url,
            self.timeout.as_millis(),
            if self.access_token.is_empty() { "[NOT SET]" } else { "[SET]" },
            t.default_ms,
            t.search_ms,
            t.details_ms,
            t.lists_ms,
        )
    }
}

/// Parses the leading decimal digits of `value`, ignoring any suffix
fn leading_number(value: &str) -> Option<u64> {
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    value[..end].parse().ok()
}

fn check_url(var: &'static str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value).map(|_| ()).map_err(|_| ConfigError::InvalidUrl {
        var,
        value: value.to_string(),
    })
}
