//! Metrics collection for engine observability

use parking_lot::RwLock;
use serde::Serialize;
use std::time::Duration;

/// Engine counters
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EngineMetrics {
    /// Views handed out, cached or not
    pub views_served: u64,

    /// Views computed from a snapshot
    pub views_computed: u64,

    pub cache_hits: u64,
    pub cache_misses: u64,

    /// Views served empty because the principal was missing or unrecognized
    pub degraded_views: u64,

    /// Average time spent computing a view
    pub avg_compute_ms: f64,
}

impl EngineMetrics {
    /// Calculate cache hit rate
    pub fn cache_hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }
}

#[derive(Default)]
struct Counters {
    metrics: EngineMetrics,
    total_compute: Duration,
}

/// Thread-safe metrics collector
#[derive(Default)]
pub struct MetricsCollector {
    inner: RwLock<Counters>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_view(&self) {
        self.inner.write().metrics.views_served += 1;
    }

    pub fn record_cache_hit(&self) {
        self.inner.write().metrics.cache_hits += 1;
    }

    pub fn record_cache_miss(&self) {
        self.inner.write().metrics.cache_misses += 1;
    }

    pub fn record_degraded(&self) {
        self.inner.write().metrics.degraded_views += 1;
    }

    /// Record one view computation and its latency
    pub fn record_compute(&self, latency: Duration) {
        let mut inner = self.inner.write();
        inner.total_compute += latency;
        inner.metrics.views_computed += 1;
        inner.metrics.avg_compute_ms =
            inner.total_compute.as_secs_f64() * 1000.0 / inner.metrics.views_computed as f64;
    }

    /// Snapshot of the current counters
    pub fn snapshot(&self) -> EngineMetrics {
        self.inner.read().metrics.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_recording() {
        let collector = MetricsCollector::new();

        collector.record_view();
        collector.record_view();
        collector.record_cache_miss();
        collector.record_cache_hit();
        collector.record_degraded();
        collector.record_compute(Duration::from_millis(2));
        collector.record_compute(Duration::from_millis(4));

        let metrics = collector.snapshot();
        assert_eq!(metrics.views_served, 2);
        assert_eq!(metrics.views_computed, 2);
        assert_eq!(metrics.degraded_views, 1);
        assert_eq!(metrics.cache_hit_rate(), 0.5);
        assert!((metrics.avg_compute_ms - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_hit_rate() {
        assert_eq!(EngineMetrics::default().cache_hit_rate(), 0.0);
    }
}
