//! Scoping engine with view caching and metrics
//!
//! Wraps [`scope_view`] for callers that re-render often:
//!
//! ```text
//! (principal, snapshot) → [ViewCache] ──hit──────────────→ Arc<ScopedView>
//!                              │miss                            ↑
//!                              └→ scope_view ─────────────────┘
//!                                      ↓
//!                                  [Metrics]
//! ```
//!
//! Cached and freshly computed views are identical; the cache only skips
//! recomputation for a principal seeing a snapshot version it already saw.

pub mod cache;
pub mod metrics;

pub use cache::{CacheStats, ViewCache};
pub use metrics::{EngineMetrics, MetricsCollector};

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use tenantscope_core::{Dataset, DatasetVersion, Principal};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::view::{scope_view, ScopedView};

/// Shareable scoping engine
///
/// All methods take `&self`; wrap the engine in an `Arc` to share it.
pub struct ScopingEngine {
    config: EngineConfig,

    /// Memoized views (absent when caching is disabled)
    cache: Option<ViewCache>,

    metrics: MetricsCollector,

    /// Last snapshot version checked for integrity violations
    checked_version: Mutex<Option<DatasetVersion>>,
}

impl ScopingEngine {
    /// Create an engine from a validated configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let cache = if config.cache.enabled {
            Some(ViewCache::new(config.cache.capacity, config.cache.ttl()))
        } else {
            None
        };

        info!(
            "ScopingEngine initialized with cache={}, capacity={}, integrity_checks={}",
            config.cache.enabled, config.cache.capacity, config.diagnostics.check_integrity
        );

        Ok(Self {
            config,
            cache,
            metrics: MetricsCollector::new(),
            checked_version: Mutex::new(None),
        })
    }

    /// Scoped view of `dataset` for `principal`
    ///
    /// A missing principal or unrecognized role yields an empty view and is
    /// never cached. Neither is a view of an unversioned snapshot.
    pub fn view(&self, principal: Option<&Principal>, dataset: &Dataset) -> Arc<ScopedView> {
        self.metrics.record_view();

        let principal = match principal {
            Some(p) if p.role.is_recognized() => p,
            other => {
                self.metrics.record_degraded();
                return Arc::new(scope_view(other, dataset));
            }
        };

        // An unversioned snapshot cannot be told apart from its successor
        let cache = self.cache.as_ref().filter(|_| dataset.is_versioned());
        if self.cache.is_some() && cache.is_none() {
            debug!(principal = %principal.id, "Unversioned snapshot, bypassing view cache");
        }

        if let Some(cache) = cache {
            if let Some(view) = cache.get(principal, dataset.version) {
                self.metrics.record_cache_hit();
                debug!(principal = %principal.id, version = dataset.version, "View cache hit");
                return view;
            }
            self.metrics.record_cache_miss();
        }

        self.check_integrity(dataset);

        let start = Instant::now();
        let view = Arc::new(scope_view(Some(principal), dataset));
        self.metrics.record_compute(start.elapsed());

        if let Some(cache) = cache {
            cache.put(principal, dataset.version, Arc::clone(&view));
        }

        view
    }

    /// Drop every cached view
    pub fn invalidate(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
            info!("View cache invalidated");
        }
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(ViewCache::stats)
    }

    /// Get engine metrics
    pub fn metrics(&self) -> EngineMetrics {
        self.metrics.snapshot()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Log integrity violations once per snapshot version
    ///
    /// Unversioned snapshots are checked on every computed view.
    fn check_integrity(&self, dataset: &Dataset) {
        if !self.config.diagnostics.check_integrity {
            return;
        }

        if dataset.is_versioned() {
            let mut checked = self.checked_version.lock();
            if *checked == Some(dataset.version) {
                return;
            }
            *checked = Some(dataset.version);
        }

        let report = dataset.integrity_report();
        if report.is_clean() {
            debug!(version = dataset.version, "Dataset passed integrity checks");
        } else {
            report.log();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_creation() {
        let engine = ScopingEngine::new(EngineConfig::default()).unwrap();
        assert!(engine.cache.is_some());
        assert_eq!(engine.metrics(), EngineMetrics::default());
    }

    #[test]
    fn test_engine_without_cache() {
        let mut config = EngineConfig::default();
        config.cache.enabled = false;

        let engine = ScopingEngine::new(config).unwrap();
        assert!(engine.cache_stats().is_none());

        let dataset = Dataset::new(1);
        engine.view(Some(&Principal::super_admin("root")), &dataset);
        engine.view(Some(&Principal::super_admin("root")), &dataset);
        assert_eq!(engine.metrics().views_computed, 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.cache.capacity = 0;
        assert!(ScopingEngine::new(config).is_err());
    }

    #[test]
    fn test_unversioned_snapshot_is_not_cached() {
        let engine = ScopingEngine::new(EngineConfig::default()).unwrap();
        let principal = Principal::employee("e1", "b1");
        let dataset = Dataset::new(tenantscope_core::UNVERSIONED);

        engine.view(Some(&principal), &dataset);
        engine.view(Some(&principal), &dataset);

        let metrics = engine.metrics();
        assert_eq!(metrics.views_computed, 2);
        assert_eq!(metrics.cache_hits + metrics.cache_misses, 0);
        assert_eq!(engine.cache_stats().unwrap().entries, 0);
    }

    #[test]
    fn test_integrity_checked_once_per_version() {
        let mut config = EngineConfig::default();
        config.diagnostics.check_integrity = true;
        let engine = ScopingEngine::new(config).unwrap();

        let dataset = Dataset::new(4);
        engine.view(Some(&Principal::super_admin("root")), &dataset);
        assert_eq!(*engine.checked_version.lock(), Some(4));

        engine.view(Some(&Principal::business("biz1", "b1")), &Dataset::new(5));
        assert_eq!(*engine.checked_version.lock(), Some(5));
    }
}
