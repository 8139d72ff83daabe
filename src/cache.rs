//! Route resolution caching.
//!
//! [`MatchCache`] is an LRU map from a normalized path to its
//! [`RouteMatch`], gated behind the `cache` feature and backed by the
//! [`lru`] crate. Because the route tree is immutable after construction,
//! a cached match never goes stale — entries only leave through capacity
//! eviction or [`clear`](MatchCache::clear).
//!
//! [`CacheStats`] counts hits and misses so cache effectiveness can be
//! inspected at runtime via
//! [`DeepLinkRouter::cache_stats`](crate::DeepLinkRouter::cache_stats).

use crate::matcher::RouteMatch;
use crate::trace_log;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Default capacity: navigation working sets are small.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Hit/miss counters for a [`MatchCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that fell through to the matcher.
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache, `0.0` when none yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache of resolved route matches, keyed by normalized path.
#[derive(Debug)]
pub struct MatchCache {
    entries: LruCache<String, RouteMatch>,
    stats: CacheStats,
}

impl MatchCache {
    /// Create a cache with [`DEFAULT_CACHE_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(
            NonZeroUsize::new(DEFAULT_CACHE_CAPACITY).expect("default capacity is non-zero"),
        )
    }

    /// Create a cache with an explicit capacity.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Look up a cached match, counting the hit or miss.
    pub fn get(&mut self, path: &str) -> Option<RouteMatch> {
        match self.entries.get(path) {
            Some(found) => {
                self.stats.hits += 1;
                trace_log!("match cache hit for '{}'", path);
                Some(found.clone())
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Store a resolved match.
    pub fn put(&mut self, path: String, m: RouteMatch) {
        self.entries.put(path, m);
    }

    /// Drop all entries. Stats are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Current hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the cache holds nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MatchCache {
    fn default() -> Self {
        Self::new()
    }
}
