//! Metrics declaration and recording helpers.
//!
//! ## Metrics
//!
//! - `seenbox_cache_hit_total` - novelty checks answered from the recency cache
//! - `seenbox_cache_miss_total` - novelty checks that went to the backend
//! - `seenbox_backend_query_errors_total` - failed backend lookups
//! - `seenbox_backend_write_total` - successful backend writes
//! - `seenbox_backend_write_errors_total` - failed backend writes
//! - `seenbox_cache_entries` - keys currently held by the recency cache (gauge)
//!
//! All metrics carry a `backend` label with the backend's label.

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
lazy_static! {
    /// Track number of novelty checks answered from the cache.
    pub static ref CACHE_HIT_COUNTER: &'static str = {
        metrics::describe_counter!(
            "seenbox_cache_hit_total",
            "Total number of novelty checks answered from the recency cache."
        );
        "seenbox_cache_hit_total"
    };
    /// Track number of novelty checks forwarded to the backend.
    pub static ref CACHE_MISS_COUNTER: &'static str = {
        metrics::describe_counter!(
            "seenbox_cache_miss_total",
            "Total number of novelty checks forwarded to the backend."
        );
        "seenbox_cache_miss_total"
    };
    /// Track number of failed backend lookups.
    pub static ref BACKEND_QUERY_ERRORS: &'static str = {
        metrics::describe_counter!(
            "seenbox_backend_query_errors_total",
            "Total number of failed backend lookups."
        );
        "seenbox_backend_query_errors_total"
    };
    /// Track number of successful backend writes.
    pub static ref BACKEND_WRITE_TOTAL: &'static str = {
        metrics::describe_counter!(
            "seenbox_backend_write_total",
            "Total number of items written to the backend."
        );
        "seenbox_backend_write_total"
    };
    /// Track number of failed backend writes.
    pub static ref BACKEND_WRITE_ERRORS: &'static str = {
        metrics::describe_counter!(
            "seenbox_backend_write_errors_total",
            "Total number of failed backend writes."
        );
        "seenbox_backend_write_errors_total"
    };
    /// Gauge of keys held by the recency cache.
    pub static ref CACHE_ENTRIES: &'static str = {
        metrics::describe_gauge!(
            "seenbox_cache_entries",
            "Number of keys currently held by the recency cache."
        );
        "seenbox_cache_entries"
    };
}

/// Record a novelty check answered from the cache.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_hit(backend: &str) {
    metrics::counter!(*CACHE_HIT_COUNTER, "backend" => backend.to_string()).increment(1);
}

/// Record a cache hit (no-op when `metrics` feature disabled).
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_hit(_backend: &str) {}

/// Record a novelty check forwarded to the backend.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_miss(backend: &str) {
    metrics::counter!(*CACHE_MISS_COUNTER, "backend" => backend.to_string()).increment(1);
}

/// Record a cache miss (no-op when `metrics` feature disabled).
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_miss(_backend: &str) {}

/// Record a failed backend lookup.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_query_error(backend: &str) {
    metrics::counter!(*BACKEND_QUERY_ERRORS, "backend" => backend.to_string()).increment(1);
}

/// Record a failed lookup (no-op when `metrics` feature disabled).
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_query_error(_backend: &str) {}

/// Record a successful write and the cache size that followed it.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_write(backend: &str, cache_entries: usize) {
    metrics::counter!(*BACKEND_WRITE_TOTAL, "backend" => backend.to_string()).increment(1);
    metrics::gauge!(*CACHE_ENTRIES, "backend" => backend.to_string()).set(cache_entries as f64);
}

/// Record a write (no-op when `metrics` feature disabled).
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_write(_backend: &str, _cache_entries: usize) {}

/// Record a failed backend write.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_write_error(backend: &str) {
    metrics::counter!(*BACKEND_WRITE_ERRORS, "backend" => backend.to_string()).increment(1);
}

/// Record a failed write (no-op when `metrics` feature disabled).
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_write_error(_backend: &str) {}
