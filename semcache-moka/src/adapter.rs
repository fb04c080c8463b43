//! Moka adapter implementation.

use async_trait::async_trait;
use bytes::Bytes;
use http::Uri;
use moka::future::Cache;
use semcache_backend::{AdapterResult, CacheAdapter, CacheKey};
use semcache_core::{Request, Response};
use tracing::trace;

/// In-memory cache adapter powered by Moka.
///
/// Entries are keyed by [`CacheKey`] (method and URI) and stored as JSON, so
/// a response read back carries exactly the headers, body and exchange
/// timestamps it was stored with.
///
/// # Caveats
///
/// - Data is **not persisted**, the cache is lost on process restart
/// - Data is **not shared** across processes
/// - Capacity eviction is LRU-like and runs lazily inside Moka
#[derive(Clone)]
pub struct MokaAdapter {
    pub(crate) cache: Cache<CacheKey, Bytes>,
    pub(crate) label: String,
}

impl std::fmt::Debug for MokaAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaAdapter")
            .field("label", &self.label)
            .field("cache", &self.cache)
            .finish()
    }
}

impl MokaAdapter {
    /// Creates a new builder for `MokaAdapter` holding at most `max_capacity`
    /// entries.
    pub fn builder(max_capacity: u64) -> crate::builder::MokaAdapterBuilder {
        crate::builder::MokaAdapterBuilder::new(max_capacity)
    }

    /// The underlying Moka cache.
    pub fn cache(&self) -> &Cache<CacheKey, Bytes> {
        &self.cache
    }
}

#[async_trait]
impl CacheAdapter for MokaAdapter {
    async fn lookup(&self, request: &Request) -> AdapterResult<Option<Response>> {
        let key = CacheKey::from_request(request);
        match self.cache.get(&key).await {
            Some(raw) => Ok(Some(serde_json::from_slice(&raw)?)),
            None => Ok(None),
        }
    }

    async fn store(&self, request: &Request, response: &Response) -> AdapterResult<()> {
        let raw = serde_json::to_vec(response)?;
        self.cache
            .insert(CacheKey::from_request(request), Bytes::from(raw))
            .await;
        Ok(())
    }

    async fn invalidate(&self, uri: &Uri) -> AdapterResult<()> {
        for key in CacheKey::all_for_uri(uri) {
            if self.cache.remove(&key).await.is_some() {
                trace!(label = %self.label, %key, "Removed cache entry");
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.label
    }
}
