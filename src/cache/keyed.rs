//! Keyed Cache Module
//!
//! Insert-only map implementing the get-or-compute protocol shared by
//! memoized functions and cached fields.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use tracing::trace;

use crate::cache::CacheStats;
use crate::config::Config;

// == Keyed Cache ==
/// Map from cache key to computed value, populated on miss.
///
/// Entries are never replaced or removed. The cache is single-threaded
/// (`!Sync`); lookups take `&self` so a producer may call back into the
/// cache it is populating.
pub struct KeyedCache<K, V> {
    /// Computed values
    entries: RefCell<HashMap<K, V>>,
    /// Lookup statistics
    stats: RefCell<CacheStats>,
    /// Whether lookups update `stats`
    record_stats: bool,
}

impl<K, V> KeyedCache<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty cache using the default configuration.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Creates an empty cache from `config`.
    pub fn with_config(config: &Config) -> Self {
        Self {
            entries: RefCell::new(HashMap::with_capacity(config.initial_capacity)),
            stats: RefCell::new(CacheStats::new()),
            record_stats: config.record_stats,
        }
    }

    // == Get Or Compute ==
    /// Returns the value stored under `key`, running `producer` to fill the
    /// slot on a miss.
    ///
    /// `producer` runs at most once per call and never for a key that
    /// already has a value.
    pub fn get_or_compute<F>(&self, key: K, producer: F) -> V
    where
        F: FnOnce() -> V,
    {
        match self.get_or_try_compute(key, || Ok::<V, std::convert::Infallible>(producer())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    // == Get Or Try Compute ==
    /// Fallible variant of [`get_or_compute`](Self::get_or_compute).
    ///
    /// A producer error is returned unchanged and nothing is stored, so the
    /// next lookup for `key` runs the producer again.
    pub fn get_or_try_compute<F, E>(&self, key: K, producer: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.entries.borrow().get(&key) {
            self.record(CacheStats::record_hit);
            return Ok(value.clone());
        }

        self.record(CacheStats::record_miss);
        trace!("Cache miss, running producer");

        // No borrow is held here: the producer may re-enter this cache.
        let value = match producer() {
            Ok(value) => value,
            Err(err) => {
                self.record(CacheStats::record_failure);
                return Err(err);
            }
        };

        // A re-entrant producer may have filled the slot already; the first
        // stored value wins.
        let mut entries = self.entries.borrow_mut();
        let stored = entries.entry(key).or_insert(value).clone();
        let total = entries.len();
        drop(entries);

        self.record(|stats| stats.set_total_entries(total));
        Ok(stored)
    }

    // == Get ==
    /// Returns the stored value for `key` without computing anything.
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.borrow().get(key).cloned()
    }

    // == Contains ==
    /// Checks whether `key` already has a value.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.borrow().contains_key(key)
    }

    // == Length ==
    /// Returns the number of stored values.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    // == Is Empty ==
    /// Returns true if nothing has been computed yet.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    // == Stats ==
    /// Returns current lookup statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.borrow().clone();
        stats.set_total_entries(self.len());
        stats
    }

    fn record(&self, update: impl FnOnce(&mut CacheStats)) {
        if self.record_stats {
            update(&mut *self.stats.borrow_mut());
        }
    }
}

impl<K, V> Default for KeyedCache<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for KeyedCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedCache")
            .field("len", &self.entries.borrow().len())
            .field("stats", &self.stats.borrow())
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_cache_new() {
        let cache: KeyedCache<u32, String> = KeyedCache::new();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.get(&1), None);
    }

    #[test]
    fn test_producer_runs_once_per_key() {
        let cache = KeyedCache::new();
        let calls = Cell::new(0);
        let produce = |n: u32| {
            calls.set(calls.get() + 1);
            n * 10
        };

        assert_eq!(cache.get_or_compute(1, || produce(1)), 10);
        assert_eq!(cache.get_or_compute(1, || produce(1)), 10);
        assert_eq!(calls.get(), 1);

        assert_eq!(cache.get_or_compute(2, || produce(2)), 20);
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.len(), 2);
        assert!(cache.contains_key(&2));
    }

    #[test]
    fn test_stored_value_never_changes() {
        let cache = KeyedCache::new();
        cache.get_or_compute("k", || "first");
        assert_eq!(cache.get_or_compute("k", || "second"), "first");
        assert_eq!(cache.get(&"k"), Some("first"));
    }

    #[test]
    fn test_failed_producer_is_not_cached() {
        let cache: KeyedCache<&str, u32> = KeyedCache::new();
        let calls = Cell::new(0);

        let result: Result<u32, String> = cache.get_or_try_compute("k", || {
            calls.set(calls.get() + 1);
            Err("boom".to_string())
        });
        assert_eq!(result, Err("boom".to_string()));
        assert!(!cache.contains_key(&"k"));

        let result: Result<u32, String> = cache.get_or_try_compute("k", || {
            calls.set(calls.get() + 1);
            Ok(7)
        });
        assert_eq!(result, Ok(7));
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.stats().failures, 1);
    }

    #[test]
    fn test_reentrant_producer() {
        fn fib(cache: &KeyedCache<u64, u64>, calls: &Cell<u32>, n: u64) -> u64 {
            cache.get_or_compute(n, || {
                calls.set(calls.get() + 1);
                if n < 2 {
                    n
                } else {
                    fib(cache, calls, n - 1) + fib(cache, calls, n - 2)
                }
            })
        }

        let cache = KeyedCache::new();
        let calls = Cell::new(0);
        assert_eq!(fib(&cache, &calls, 40), 102_334_155);
        assert_eq!(calls.get(), 41);
        assert_eq!(cache.len(), 41);
    }

    #[test]
    fn test_reentrant_fill_keeps_first_value() {
        let cache = KeyedCache::new();
        let outer = cache.get_or_compute(1, || {
            cache.get_or_compute(1, || "inner");
            "outer"
        });
        assert_eq!(outer, "inner");
        assert_eq!(cache.get(&1), Some("inner"));
    }

    #[test]
    fn test_stats() {
        let cache = KeyedCache::new();
        cache.get_or_compute(1, || 1); // miss
        cache.get_or_compute(1, || 1); // hit
        cache.get_or_compute(2, || 2); // miss

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.total_entries, 2);
    }

    #[test]
    fn test_stats_disabled_by_config() {
        let config = Config {
            initial_capacity: 16,
            record_stats: false,
        };
        let cache = KeyedCache::with_config(&config);
        cache.get_or_compute(1, || 1);
        cache.get_or_compute(1, || 1);

        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.total_entries, 1);
    }
}
