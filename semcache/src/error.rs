//! Error types for cache engine operations.

use semcache_backend::AdapterError;
use semcache_core::InvalidCacheMode;
use thiserror::Error;

/// Boxed error returned by executors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Invalid engine configuration. No engine is created when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The cache mode is not one of `public` or `private`.
    #[error(transparent)]
    InvalidMode(#[from] InvalidCacheMode),
    /// The cache mode was never set.
    #[error("cache mode is not set")]
    MissingMode,
}

/// Error type for cache operations.
///
/// Nothing is swallowed: a failing adapter call or executor aborts the
/// operation and is returned as is.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Invalid engine configuration.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    /// The executor failed. The original error can be recovered with
    /// [`Box::downcast`].
    #[error("request execution failed: {0}")]
    Execution(#[source] BoxError),
    /// The cache adapter failed.
    #[error("cache adapter error: {0}")]
    Adapter(#[from] AdapterError),
}
