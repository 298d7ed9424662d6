//! Insight counters
//!
//! Counters only, monotonic, relaxed atomics.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters kept by an element library for its insight pipeline.
#[derive(Debug, Default)]
pub struct InsightMetrics {
    requests: AtomicU64,
    created: AtomicU64,
    unavailable: AtomicU64,
    failures: AtomicU64,
    classifications_aborted: AtomicU64,
    template_loads: AtomicU64,
    template_cache_hits: AtomicU64,
}

impl InsightMetrics {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_created(&self) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unavailable(&self) {
        self.unavailable.fetch_add(1, Ordering::Relaxed);
    }

    /// A factory failed while building an insight
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_classification_aborted(&self) {
        self.classifications_aborted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_template_load(&self) {
        self.template_loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.template_cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            created: self.created.load(Ordering::Relaxed),
            unavailable: self.unavailable.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            classifications_aborted: self.classifications_aborted.load(Ordering::Relaxed),
            template_loads: self.template_loads.load(Ordering::Relaxed),
            template_cache_hits: self.template_cache_hits.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of the insight counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub created: u64,
    pub unavailable: u64,
    pub failures: u64,
    pub classifications_aborted: u64,
    pub template_loads: u64,
    pub template_cache_hits: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metrics_are_zero() {
        let snapshot = InsightMetrics::new().snapshot();
        assert_eq!(snapshot.requests, 0);
        assert_eq!(snapshot.template_cache_hits, 0);
    }

    #[test]
    fn test_counters_increment() {
        let metrics = InsightMetrics::new();
        metrics.record_request();
        metrics.record_request();
        metrics.record_created();
        metrics.record_cache_hit();
        metrics.record_failure();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.requests, 2);
        assert_eq!(snapshot.created, 1);
        assert_eq!(snapshot.unavailable, 0);
        assert_eq!(snapshot.template_cache_hits, 1);
        assert_eq!(snapshot.failures, 1);
    }
}
