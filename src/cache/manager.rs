//! Cache manager for holding decoded API responses in memory
//!
//! Provides a `ResponseCache` that stores typed values with the time they were
//! stored. Expiry is judged on read against a caller-supplied TTL.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::clock::{Clock, SystemClock};

/// A stored response and the time it was stored
struct CacheEntry {
    /// The decoded response, downcast to the endpoint's type on read
    data: Arc<dyn Any + Send + Sync>,
    /// When the entry was written (epoch milliseconds)
    stored_at_ms: i64,
}

/// Result of reading from cache, including metadata about cache freshness
#[derive(Debug)]
pub struct CachedData<T> {
    /// The cached data
    pub data: T,
    /// When the data was stored (epoch milliseconds)
    pub stored_at_ms: i64,
    /// Whether the entry is older than the TTL it was read with
    pub is_expired: bool,
}

/// Process-local response cache keyed by request URL
///
/// At most one entry exists per key. Entries are only replaced by `write` and
/// only removed by `clear`. The lock is held for the map operation alone and
/// never across an `.await`.
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseCache")
            .field("entries", &self.len())
            .field("clock", &self.clock)
            .finish()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCache {
    /// Creates an empty cache using the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty cache that reads time from `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Current time according to the cache's clock
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        // Entries are replaced whole, so a poisoned map is still consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `data` under `key`, replacing any previous entry
    pub fn write<T>(&self, key: impl Into<String>, data: T)
    where
        T: Send + Sync + 'static,
    {
        let entry = CacheEntry {
            data: Arc::new(data),
            stored_at_ms: self.clock.now_ms(),
        };
        self.lock().insert(key.into(), entry);
    }

    /// Reads the entry for `key`, judging freshness against `ttl_ms`
    ///
    /// Returns `None` when there is no entry or when the stored value is not a
    /// `T`. An entry is fresh while `now - stored_at < ttl_ms`; otherwise it is
    /// returned with `is_expired = true`.
    pub fn read<T>(&self, key: &str, ttl_ms: u64) -> Option<CachedData<T>>
    where
        T: Clone + Send + Sync + 'static,
    {
        let now = self.clock.now_ms();
        let entries = self.lock();
        let entry = entries.get(key)?;
        let data = entry.data.downcast_ref::<T>()?.clone();

        let age_ms = now.saturating_sub(entry.stored_at_ms);
        let ttl_ms = i64::try_from(ttl_ms).unwrap_or(i64::MAX);

        Some(CachedData {
            data,
            stored_at_ms: entry.stored_at_ms,
            is_expired: age_ms >= ttl_ms,
        })
    }

    /// Returns `true` if an entry exists for `key`, fresh or not
    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    /// Removes every entry
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of entries, including stale ones
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[derive(Debug, Clone, PartialEq)]
    struct TestData {
        name: String,
        value: i32,
    }

    fn create_test_cache() -> (ResponseCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000_000));
        let cache = ResponseCache::with_clock(clock.clone());
        (cache, clock)
    }

    fn sample(name: &str, value: i32) -> TestData {
        TestData {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn test_read_returns_none_for_missing_key() {
        let (cache, _clock) = create_test_cache();

        let result: Option<CachedData<TestData>> = cache.read("nonexistent_key", 1_000);

        assert!(result.is_none(), "Should return None for missing key");
    }

    #[test]
    fn test_read_returns_fresh_data_within_ttl() {
        let (cache, clock) = create_test_cache();
        cache.write("fresh_key", sample("fresh", 100));

        clock.advance_ms(999);
        let result: CachedData<TestData> = cache.read("fresh_key", 1_000).expect("Should read entry");

        assert_eq!(result.data, sample("fresh", 100));
        assert_eq!(result.stored_at_ms, 1_000_000);
        assert!(!result.is_expired, "Entry younger than TTL should be fresh");
    }

    #[test]
    fn test_entry_expires_exactly_at_ttl() {
        let (cache, clock) = create_test_cache();
        cache.write("edge_key", sample("edge", 1));

        clock.advance_ms(1_000);
        let result: CachedData<TestData> = cache.read("edge_key", 1_000).expect("Should read entry");

        assert!(result.is_expired, "Entry aged exactly TTL should be expired");
        assert_eq!(result.data, sample("edge", 1), "Stale data is still returned");
    }

    #[test]
    fn test_freshness_depends_on_ttl_passed_to_read() {
        let (cache, clock) = create_test_cache();
        cache.write("shared", sample("shared", 7));
        clock.advance_ms(150_000);

        let short: CachedData<TestData> = cache.read("shared", 120_000).unwrap();
        let long: CachedData<TestData> = cache.read("shared", 900_000).unwrap();

        assert!(short.is_expired);
        assert!(!long.is_expired);
    }

    #[test]
    fn test_read_with_wrong_type_is_a_miss() {
        let (cache, _clock) = create_test_cache();
        cache.write("typed", sample("typed", 3));

        let result: Option<CachedData<String>> = cache.read("typed", 1_000);

        assert!(result.is_none());
        assert!(cache.contains("typed"));
    }

    #[test]
    fn test_overwrite_replaces_entry_and_timestamp() {
        let (cache, clock) = create_test_cache();
        cache.write("overwrite_key", sample("first", 1));
        clock.advance_ms(5_000);
        cache.write("overwrite_key", sample("second", 2));

        let result: CachedData<TestData> = cache.read("overwrite_key", 1_000).unwrap();

        assert_eq!(result.data, sample("second", 2), "Cache should contain latest data");
        assert_eq!(result.stored_at_ms, 1_005_000);
        assert!(!result.is_expired);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_removes_all_entries() {
        let (cache, _clock) = create_test_cache();
        cache.write("a", sample("a", 1));
        cache.write("b", sample("b", 2));
        assert_eq!(cache.len(), 2);

        cache.clear();

        assert!(cache.is_empty());
        assert!(cache.read::<TestData>("a", u64::MAX).is_none());
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let (cache, clock) = create_test_cache();
        cache.write("k", sample("k", 0));
        clock.advance_ms(i64::MAX / 2);

        let result: CachedData<TestData> = cache.read("k", u64::MAX).unwrap();

        assert!(!result.is_expired);
    }

    #[test]
    fn test_debug_reports_entry_count() {
        let (cache, _clock) = create_test_cache();
        cache.write("k", sample("k", 0));
        let rendered = format!("{:?}", cache);
        assert!(rendered.contains("entries: 1"));
    }
}
