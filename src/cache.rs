//! Route resolution caching.
//!
//! This module provides [`ResolveCache`] — an LRU cache mapping a requested
//! url to the [`RouteId`] that resolved it. It is gated behind the `cache`
//! feature flag and uses the [`lru`] crate internally.
//!
//! Resolution depends on the full registry contents, so the registry clears
//! the cache on every insert and removal. A cached id therefore always names
//! the entry a fresh scan would return.
//!
//! [`CacheStats`] tracks hits, misses, and invalidations so you can monitor
//! cache effectiveness at runtime.
//!
//! # Examples
//!
//! ```
//! use navigator_core::cache::ResolveCache;
//! use navigator_core::RouteId;
//!
//! let mut cache = ResolveCache::new();
//! cache.insert("/users/1".to_string(), RouteId::from_raw(3));
//!
//! assert_eq!(cache.get("/users/1"), Some(RouteId::from_raw(3)));
//! assert_eq!(cache.stats().hits, 1);
//! ```

use crate::registry::RouteId;
use crate::{debug_log, trace_log};
use lru::LruCache;
use std::num::NonZeroUsize;

/// Counters tracking cache hit/miss rates and invalidations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: usize,
    /// Number of cache misses.
    pub misses: usize,
    /// Number of full cache invalidations (via [`ResolveCache::clear`]).
    pub invalidations: usize,
}

impl CacheStats {
    /// Return the hit rate as a value in `0.0..=1.0`.
    ///
    /// Returns `0.0` if no lookups have been performed.
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache for url → route resolution results.
#[derive(Debug)]
pub struct ResolveCache {
    entries: LruCache<String, RouteId>,
    stats: CacheStats,
}

impl ResolveCache {
    /// Default number of cached urls.
    pub const DEFAULT_CAPACITY: usize = 1000;

    /// Create a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a cache holding at most `capacity` urls.
    ///
    /// A capacity of zero is clamped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(cap),
            stats: CacheStats::default(),
        }
    }

    /// Drop every cached resolution and increment the invalidation counter.
    pub fn clear(&mut self) {
        let len = self.entries.len();
        self.entries.clear();
        self.stats.invalidations += 1;
        debug_log!(
            "Resolve cache cleared: {} entries removed ({} total invalidations, hit rate: {:.1}%)",
            len,
            self.stats.invalidations,
            self.stats.hit_rate() * 100.0
        );
    }

    /// Look up the cached route for `url`. Updates hit/miss stats.
    pub fn get(&mut self, url: &str) -> Option<RouteId> {
        if let Some(id) = self.entries.get(url) {
            self.stats.hits += 1;
            trace_log!("Resolve cache hit for '{}'", url);
            Some(*id)
        } else {
            self.stats.misses += 1;
            trace_log!("Resolve cache miss for '{}'", url);
            None
        }
    }

    /// Remember that `url` resolved to `id`.
    pub fn insert(&mut self, url: String, id: RouteId) {
        self.entries.push(url, id);
    }

    /// Return a reference to the current cache statistics.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Reset all counters in [`CacheStats`] to zero.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// Number of cached urls.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of cached urls.
    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}

impl Default for ResolveCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_creation() {
        let cache = ResolveCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), ResolveCache::DEFAULT_CAPACITY);
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let cache = ResolveCache::with_capacity(0);
        assert_eq!(cache.capacity(), 1);
    }

    #[test]
    fn test_cache_miss() {
        let mut cache = ResolveCache::new();
        assert!(cache.get("/dashboard").is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_cache_hit() {
        let mut cache = ResolveCache::new();
        cache.insert("/dashboard/analytics".to_string(), RouteId::from_raw(1));

        assert_eq!(cache.get("/dashboard/analytics"), Some(RouteId::from_raw(1)));
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_cache_clear() {
        let mut cache = ResolveCache::new();
        cache.insert("/dashboard".to_string(), RouteId::from_raw(1));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().invalidations, 1);
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = ResolveCache::with_capacity(2);
        cache.insert("/a".to_string(), RouteId::from_raw(1));
        cache.insert("/b".to_string(), RouteId::from_raw(2));
        cache.get("/a");
        cache.insert("/c".to_string(), RouteId::from_raw(3));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("/b").is_none());
        assert_eq!(cache.get("/a"), Some(RouteId::from_raw(1)));
    }

    #[test]
    fn test_hit_rate_calculation() {
        let mut cache = ResolveCache::new();
        cache.get("/a");
        cache.get("/b");
        cache.get("/c");

        cache.insert("/a".to_string(), RouteId::from_raw(1));
        cache.insert("/b".to_string(), RouteId::from_raw(1));

        cache.get("/a");
        cache.get("/b");

        assert_eq!(cache.stats().hits, 2);
        assert_eq!(cache.stats().misses, 3);
        assert!((cache.stats().hit_rate() - 0.4).abs() < 0.001);

        cache.reset_stats();
        assert_eq!(cache.stats(), &CacheStats::default());
    }
}
