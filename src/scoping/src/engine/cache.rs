//! Scoped view cache keyed by principal and dataset version

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use blake3::Hasher;

use tenantscope_core::{DatasetVersion, Principal};

use crate::view::ScopedView;

/// Cache key type (BLAKE3 hash)
type CacheKey = [u8; 32];

/// Cached view with insertion time for TTL
#[derive(Clone)]
struct CachedView {
    view: Arc<ScopedView>,
    cached_at: Instant,
}

impl CachedView {
    fn new(view: Arc<ScopedView>) -> Self {
        Self {
            view,
            cached_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() > ttl
    }
}

/// Memoized scoped views
///
/// Keys cover every principal field scoping reads (id, role, tenant) plus
/// the snapshot version, so a cached view is only reused for an identical
/// request against an unchanged snapshot. The Data Store must bump the
/// version whenever a collection changes.
pub struct ViewCache {
    /// In-memory cache (thread-safe)
    entries: Arc<DashMap<CacheKey, CachedView>>,

    /// Maximum number of entries
    capacity: usize,

    /// Time-to-live for cached views
    ttl: Duration,

    /// Cache statistics
    stats: Arc<DashMap<String, usize>>,
}

impl ViewCache {
    /// Create a new view cache
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            capacity: capacity.max(1),
            ttl,
            stats: Arc::new(DashMap::new()),
        }
    }

    /// Get a cached view
    pub fn get(&self, principal: &Principal, version: DatasetVersion) -> Option<Arc<ScopedView>> {
        let key = Self::compute_key(principal, version);

        if let Some(entry) = self.entries.get(&key) {
            if entry.is_expired(self.ttl) {
                // Expired - remove and report a miss
                drop(entry);
                self.entries.remove(&key);
                self.increment_stat("expirations");
                self.increment_stat("misses");
                return None;
            }

            self.increment_stat("hits");
            return Some(Arc::clone(&entry.view));
        }

        self.increment_stat("misses");
        None
    }

    /// Store a view in the cache
    ///
    /// Concurrent inserts may briefly overshoot the capacity; each insert
    /// evicts until the cache is back within bounds.
    pub fn put(&self, principal: &Principal, version: DatasetVersion, view: Arc<ScopedView>) {
        let key = Self::compute_key(principal, version);

        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.evict();
        }

        self.entries.insert(key, CachedView::new(view));

        while self.entries.len() > self.capacity {
            self.evict();
        }
    }

    /// Clear the entire cache
    pub fn clear(&self) {
        self.entries.clear();
        self.stats.clear();
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.get_stat("hits"),
            misses: self.get_stat("misses"),
            expirations: self.get_stat("expirations"),
            evictions: self.get_stat("evictions"),
            entries: self.entries.len(),
            max_entries: self.capacity,
        }
    }

    /// Compute cache key from principal and snapshot version
    fn compute_key(principal: &Principal, version: DatasetVersion) -> CacheKey {
        let mut hasher = Hasher::new();

        // Length-prefix each field so ("ab", "c") and ("a", "bc") differ
        hash_field(&mut hasher, principal.id.as_bytes());
        hash_field(&mut hasher, principal.role.as_str().as_bytes());

        match principal.business_id.as_deref() {
            Some(business_id) => {
                hasher.update(&[1]);
                hash_field(&mut hasher, business_id.as_bytes());
            }
            None => {
                hasher.update(&[0]);
            }
        }

        hasher.update(&version.to_le_bytes());

        *hasher.finalize().as_bytes()
    }

    /// Drop expired entries, then the oldest tenth of the cache if still full
    fn evict(&self) {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(ttl));

        if self.entries.len() >= self.capacity {
            let mut by_age: Vec<(CacheKey, Instant)> = self
                .entries
                .iter()
                .map(|entry| (*entry.key(), entry.value().cached_at))
                .collect();
            by_age.sort_by_key(|(_, cached_at)| *cached_at);

            let to_remove = (self.capacity / 10).max(1);
            for (key, _) in by_age.into_iter().take(to_remove) {
                self.entries.remove(&key);
            }
        }

        let removed = before.saturating_sub(self.entries.len());
        for _ in 0..removed {
            self.increment_stat("evictions");
        }
    }

    fn increment_stat(&self, key: &str) {
        self.stats
            .entry(key.to_string())
            .and_modify(|count| *count += 1)
            .or_insert(1);
    }

    fn get_stat(&self, key: &str) -> usize {
        self.stats.get(key).map(|v| *v).unwrap_or(0)
    }
}

fn hash_field(hasher: &mut Hasher, bytes: &[u8]) {
    hasher.update(&(bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

/// Cache statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub expirations: usize,
    pub evictions: usize,
    pub entries: usize,
    pub max_entries: usize,
}

impl CacheStats {
    /// Calculate cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
