//! Metrics for cache operations.
//!
//! Enabled with the `metrics` feature. Without it every `record_*` function
//! is an empty inline function.
//!
//! | name | kind | labels |
//! |------|------|--------|
//! | `semcache_requests_total` | counter | `status`, `adapter` |
//! | `semcache_invalidations_total` | counter | `adapter` |
//! | `semcache_stores_total` | counter | `adapter` |
//! | `semcache_adapter_errors_total` | counter | `adapter`, `operation` |
//! | `semcache_upstream_duration_seconds` | histogram | `outcome` |

use std::time::Duration;

use crate::context::CacheStatus;

#[cfg(feature = "metrics")]
lazy_static::lazy_static! {
    /// Track requests by cache status.
    pub static ref CACHE_REQUESTS: &'static str = {
        metrics::describe_counter!(
            "semcache_requests_total",
            "Total number of requests handled by the cache engine, by cache status."
        );
        "semcache_requests_total"
    };
    /// Track cache invalidations.
    pub static ref CACHE_INVALIDATIONS: &'static str = {
        metrics::describe_counter!(
            "semcache_invalidations_total",
            "Total number of URI invalidations caused by unsafe requests."
        );
        "semcache_invalidations_total"
    };
    /// Track responses written to the adapter.
    pub static ref CACHE_STORES: &'static str = {
        metrics::describe_counter!(
            "semcache_stores_total",
            "Total number of responses written to the cache adapter."
        );
        "semcache_stores_total"
    };
    /// Track failing adapter calls.
    pub static ref CACHE_ADAPTER_ERRORS: &'static str = {
        metrics::describe_counter!(
            "semcache_adapter_errors_total",
            "Total number of failed cache adapter calls."
        );
        "semcache_adapter_errors_total"
    };
    /// Track upstream execution time.
    pub static ref UPSTREAM_DURATION: &'static str = {
        metrics::describe_histogram!(
            "semcache_upstream_duration_seconds",
            metrics::Unit::Seconds,
            "Time spent waiting for the executor."
        );
        "semcache_upstream_duration_seconds"
    };
}

/// Record the cache status of a finished `perform` call.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_status(status: CacheStatus, adapter: &str) {
    metrics::counter!(
        *CACHE_REQUESTS,
        "status" => status.as_str(),
        "adapter" => adapter.to_string()
    )
    .increment(1);
}

/// No-op without the `metrics` feature.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_status(_status: CacheStatus, _adapter: &str) {}

/// Record a URI invalidation.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_invalidation(adapter: &str) {
    metrics::counter!(*CACHE_INVALIDATIONS, "adapter" => adapter.to_string()).increment(1);
}

/// No-op without the `metrics` feature.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_invalidation(_adapter: &str) {}

/// Record a response written to the adapter.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_store(adapter: &str) {
    metrics::counter!(*CACHE_STORES, "adapter" => adapter.to_string()).increment(1);
}

/// No-op without the `metrics` feature.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_store(_adapter: &str) {}

/// Record a failed adapter call.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_adapter_error(adapter: &str, operation: &'static str) {
    metrics::counter!(
        *CACHE_ADAPTER_ERRORS,
        "adapter" => adapter.to_string(),
        "operation" => operation
    )
    .increment(1);
}

/// No-op without the `metrics` feature.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_adapter_error(_adapter: &str, _operation: &'static str) {}

/// Record how long the executor took and whether it succeeded.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_upstream(duration: Duration, success: bool) {
    let outcome = if success { "success" } else { "error" };
    metrics::histogram!(*UPSTREAM_DURATION, "outcome" => outcome).record(duration.as_secs_f64());
}

/// No-op without the `metrics` feature.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_upstream(_duration: Duration, _success: bool) {}
