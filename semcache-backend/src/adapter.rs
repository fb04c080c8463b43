use std::sync::Arc;

use async_trait::async_trait;
use http::Uri;
use semcache_core::{Request, Response};

use crate::AdapterError;

pub type AdapterResult<T> = Result<T, AdapterError>;

/// Storage contract consumed by the cache engine.
///
/// The engine never builds keys itself, it always hands the original request
/// back to the adapter. Consistency between concurrent calls is the
/// adapter's responsibility.
#[async_trait]
pub trait CacheAdapter: Sync + Send {
    /// Returns the response stored for an equivalent request.
    ///
    /// A missing entry is `Ok(None)`, never an error.
    async fn lookup(&self, request: &Request) -> AdapterResult<Option<Response>>;

    /// Stores `response` for `request`, replacing any previous entry with the
    /// same key.
    async fn store(&self, request: &Request, response: &Response) -> AdapterResult<()>;

    /// Removes every entry associated with `uri`.
    ///
    /// Must succeed when there is nothing to remove.
    async fn invalidate(&self, uri: &Uri) -> AdapterResult<()>;

    /// Returns the name of this adapter, used in logs and metrics.
    fn name(&self) -> &str {
        "adapter"
    }
}

#[async_trait]
impl CacheAdapter for &dyn CacheAdapter {
    async fn lookup(&self, request: &Request) -> AdapterResult<Option<Response>> {
        (*self).lookup(request).await
    }

    async fn store(&self, request: &Request, response: &Response) -> AdapterResult<()> {
        (*self).store(request, response).await
    }

    async fn invalidate(&self, uri: &Uri) -> AdapterResult<()> {
        (*self).invalidate(uri).await
    }

    fn name(&self) -> &str {
        (*self).name()
    }
}

#[async_trait]
impl CacheAdapter for Box<dyn CacheAdapter> {
    async fn lookup(&self, request: &Request) -> AdapterResult<Option<Response>> {
        (**self).lookup(request).await
    }

    async fn store(&self, request: &Request, response: &Response) -> AdapterResult<()> {
        (**self).store(request, response).await
    }

    async fn invalidate(&self, uri: &Uri) -> AdapterResult<()> {
        (**self).invalidate(uri).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl CacheAdapter for Arc<dyn CacheAdapter> {
    async fn lookup(&self, request: &Request) -> AdapterResult<Option<Response>> {
        (**self).lookup(request).await
    }

    async fn store(&self, request: &Request, response: &Response) -> AdapterResult<()> {
        (**self).store(request, response).await
    }

    async fn invalidate(&self, uri: &Uri) -> AdapterResult<()> {
        (**self).invalidate(uri).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
