//! Canonicalizing LRU cache.
//!
//! All kernel object construction funnels through this type: a raw key is
//! canonicalized, then either resolved to the already-shared value (bumping
//! its recency) or built once and inserted, evicting the least recently used
//! entry at capacity. While an entry lives, equal canonical keys always
//! yield the identical shared value; eviction only removes the fast path,
//! outstanding handles stay valid.

use std::convert::Infallible;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

/// Cache sizing.
#[derive(Clone, Debug)]
pub struct CacheConfig {
    /// Maximum number of live entries; at least 1.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig { capacity: 128 }
    }
}

/// Hit/miss/eviction counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

struct Entry<V> {
    value: V,
    last_used: u64,
}

/// A bounded canonicalize-then-memoize map.
pub struct CanonicalCache<K, V> {
    entries: FxHashMap<K, Entry<V>>,
    config: CacheConfig,
    stats: CacheStats,
    tick: u64,
}

impl<K: Hash + Eq + Clone, V: Clone> CanonicalCache<K, V> {
    pub fn new(config: CacheConfig) -> Self {
        debug_assert!(config.capacity >= 1);
        CanonicalCache {
            entries: FxHashMap::default(),
            config,
            stats: CacheStats::default(),
            tick: 0,
        }
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonicalizes `raw`, returns the shared value for the canonical key,
    /// building it with `create` on a miss.
    pub fn obtain<R>(
        &mut self,
        raw: R,
        canonicalize: impl FnOnce(R) -> K,
        create: impl FnOnce(&K) -> V,
    ) -> V {
        match self.try_obtain::<R, Infallible>(raw, canonicalize, |k| Ok(create(k))) {
            Ok(v) => v,
            Err(never) => match never {},
        }
    }

    /// Fallible variant: a failed `create` leaves the cache unchanged.
    pub fn try_obtain<R, E>(
        &mut self,
        raw: R,
        canonicalize: impl FnOnce(R) -> K,
        create: impl FnOnce(&K) -> Result<V, E>,
    ) -> Result<V, E> {
        let key = canonicalize(raw);
        self.tick += 1;
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.last_used = self.tick;
            self.stats.hits += 1;
            return Ok(entry.value.clone());
        }
        self.stats.misses += 1;
        let value = create(&key)?;
        if self.entries.len() >= self.config.capacity {
            self.evict_lru();
        }
        self.entries.insert(
            key,
            Entry {
                value: value.clone(),
                last_used: self.tick,
            },
        );
        Ok(value)
    }

    fn evict_lru(&mut self) {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.last_used)
            .map(|(k, _)| k.clone());
        if let Some(k) = victim {
            self.entries.remove(&k);
            self.stats.evictions += 1;
            trace!(live = self.entries.len(), "cache eviction");
        }
    }
}
