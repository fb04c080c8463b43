#![warn(missing_docs)]
//! In-memory cache adapter for Semcache powered by [Moka](https://docs.rs/moka).
//!
//! ```
//! use semcache_moka::MokaAdapter;
//!
//! let adapter = MokaAdapter::builder(10_000).label("api").build();
//! ```

mod adapter;
mod builder;

pub use adapter::MokaAdapter;
pub use builder::MokaAdapterBuilder;
