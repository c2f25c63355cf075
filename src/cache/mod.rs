//! In-memory response cache
//!
//! Stores decoded API responses keyed by request URL. Freshness is decided at
//! read time against the TTL of the caller's cache category; stale entries are
//! reported with `is_expired = true` and overwritten by the next successful
//! fetch. Nothing is swept in the background.

mod manager;
mod policy;

pub use manager::{CachedData, ResponseCache};
pub use policy::{CacheCategory, CacheTtls};
