//! Translation metrics.
//!
//! Counters for one translator: session cache hits and misses, dictionary
//! hits, and calls to the remote service. Every printer owns its own set so
//! independent printers never share counts.

use serde::Serialize;

/// Per-translator counters.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Number of times a translation was found in the session cache
    cache_hits: usize,

    /// Number of times a translation was not found in the session cache
    cache_misses: usize,

    /// Number of phrases resolved from the dictionary file
    dictionary_hits: usize,

    /// Number of calls made to the remote translation service
    remote_calls: usize,

    /// Number of remote calls that failed
    remote_failures: usize,
}

impl TranslationMetrics {
    /// Create a set of counters, all at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cache hit (phrase already resolved this session).
    pub fn record_cache_hit(&mut self) {
        self.cache_hits += 1;
    }

    /// Record a cache miss (phrase not resolved yet).
    pub fn record_cache_miss(&mut self) {
        self.cache_misses += 1;
    }

    /// Record a phrase resolved from the dictionary file.
    pub fn record_dictionary_hit(&mut self) {
        self.dictionary_hits += 1;
    }

    /// Record a call to the remote translation service.
    pub fn record_remote_call(&mut self) {
        self.remote_calls += 1;
    }

    /// Record a failed remote call.
    pub fn record_remote_failure(&mut self) {
        self.remote_failures += 1;
    }

    /// Get the current cache hit count.
    pub fn cache_hits(&self) -> usize {
        self.cache_hits
    }

    /// Get the current cache miss count.
    pub fn cache_misses(&self) -> usize {
        self.cache_misses
    }

    /// Get the current dictionary hit count.
    pub fn dictionary_hits(&self) -> usize {
        self.dictionary_hits
    }

    /// Get the current remote call count.
    pub fn remote_calls(&self) -> usize {
        self.remote_calls
    }

    /// Get the current remote failure count.
    pub fn remote_failures(&self) -> usize {
        self.remote_failures
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let total_cache_queries = hits + misses;
        let cache_hit_rate = if total_cache_queries > 0 {
            (hits as f64 / total_cache_queries as f64) * 100.0
        } else {
            0.0
        };

        let calls = self.remote_calls();
        let failures = self.remote_failures();
        let remote_success_rate = if calls > 0 {
            ((calls - failures) as f64 / calls as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            dictionary_hits: self.dictionary_hits(),
            remote_calls: calls,
            remote_failures: failures,
            remote_success_rate,
        }
    }
}

/// Snapshot of translation statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub cache_misses: usize,

    /// Cache hit rate as a percentage (0-100)
    pub cache_hit_rate: f64,

    pub dictionary_hits: usize,
    pub remote_calls: usize,
    pub remote_failures: usize,

    /// Remote success rate as a percentage (0-100)
    pub remote_success_rate: f64,
}
