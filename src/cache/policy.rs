//! Cache categories and their time-to-live table

use std::fmt;

/// Selects which TTL applies to a request
///
/// The category is chosen by the endpoint, never derived from the URL.
/// `Lists` is what `fetch_with_cache` callers get when they don't care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CacheCategory {
    /// Free-text search results
    Search,
    /// Single-movie detail pages
    Details,
    /// Paged movie lists (popular, trending, ...)
    #[default]
    Lists,
    /// Everything else (credits, videos, similar, recommended)
    Default,
}

impl CacheCategory {
    /// Returns the lowercase name used in logs and config
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheCategory::Search => "search",
            CacheCategory::Details => "details",
            CacheCategory::Lists => "lists",
            CacheCategory::Default => "default",
        }
    }
}

impl fmt::Display for CacheCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time-to-live per cache category, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    pub default_ms: u64,
    pub search_ms: u64,
    pub details_ms: u64,
    pub lists_ms: u64,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            default_ms: 300_000, // 5 minutes
            search_ms: 120_000,  // 2 minutes
            details_ms: 900_000, // 15 minutes
            lists_ms: 300_000,   // 5 minutes
        }
    }
}

impl CacheTtls {
    /// Looks up the TTL for a category
    pub fn ttl_ms(&self, category: CacheCategory) -> u64 {
        match category {
            CacheCategory::Search => self.search_ms,
            CacheCategory::Details => self.details_ms,
            CacheCategory::Lists => self.lists_ms,
            CacheCategory::Default => self.default_ms,
        }
    }
}
