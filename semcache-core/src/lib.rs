#![warn(missing_docs)]
//! # semcache-core
//!
//! HTTP caching semantics for the Semcache caching layer.
//!
//! This crate holds the pure, side-effect free part of Semcache: the values
//! passed between the engine, executors and cache adapters, and the rules
//! deciding what may be reused, revalidated or stored.
//!
//! - [`CacheControl`] - parsed `Cache-Control` directives
//! - [`CacheMode`] - shared (`public`) or single-consumer (`private`) cache
//! - [`Request`] / [`CacheableRequest`] - request values and classification
//! - [`Response`] / [`CacheableResponse`] - freshness, storability and
//!   `304 Not Modified` merging
//!
//! Nothing here performs I/O; see the `semcache` crate for the engine that
//! drives these rules against an executor and a cache adapter.

pub mod cache_control;
pub mod date;
pub mod mode;
pub mod request;
pub mod response;

pub use cache_control::{CacheControl, MaxStale};
pub use date::{format_http_date, parse_http_date};
pub use mode::{CacheMode, InvalidCacheMode};
pub use request::{CacheableRequest, Request};
pub use response::{CACHEABLE_STATUS_CODES, CacheableResponse, Response};
