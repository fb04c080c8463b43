// #![warn(missing_docs)]
//! Traits and structs for Semcache cache adapters.
//!
//! If you want to plug your own storage into the cache engine, implement
//! [`CacheAdapter`]. The engine only relies on its three operations:
//!
//! - `lookup(request)` - a stored response for an equivalent request, or none
//! - `store(request, response)` - persist or overwrite an entry
//! - `invalidate(uri)` - drop every entry for a URI
mod adapter;
mod error;
mod key;

pub use adapter::{AdapterResult, CacheAdapter};
pub use error::AdapterError;
pub use key::CacheKey;
