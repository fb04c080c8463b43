#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Engine configuration.
///
/// [`CacheConfig`] carries the [`CacheMode`] and deserializes from any serde
/// format, rejecting unknown modes.
pub mod config;

/// Outcome reporting for a single request.
pub mod context;

/// The [`CacheEngine`] orchestrator and its builder.
pub mod engine;

/// Error types for cache operations.
///
/// Defines [`CacheError`] which covers:
/// - Configuration errors (unknown or missing mode)
/// - Executor failures, boxed but otherwise unchanged
/// - Cache adapter failures
pub mod error;

/// The [`Executor`] contract for performing the real network exchange.
pub mod executor;

/// Metrics for cache operations, recorded with the `metrics` feature.
pub mod metrics;

pub use config::CacheConfig;
pub use context::CacheStatus;
pub use engine::{CacheEngine, CacheEngineBuilder, NotSet};
pub use error::{BoxError, CacheError, ConfigurationError};
pub use executor::Executor;

pub use semcache_backend::{AdapterError, AdapterResult, CacheAdapter, CacheKey};
pub use semcache_core::{
    CacheControl, CacheMode, CacheableRequest, CacheableResponse, InvalidCacheMode, Request,
    Response,
};

/// Common imports for working with the engine.
pub mod prelude {
    pub use crate::{
        CacheAdapter, CacheConfig, CacheEngine, CacheError, CacheMode, CacheStatus, Executor,
        Request, Response,
    };
}
