//! The cache engine.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use semcache_backend::{AdapterError, CacheAdapter};
use semcache_core::{CacheMode, CacheableRequest, CacheableResponse, InvalidCacheMode};
use semcache_core::{Request, Response};
use tracing::{debug, warn};

use crate::config::CacheConfig;
use crate::context::CacheStatus;
use crate::error::{CacheError, ConfigurationError};
use crate::executor::Executor;
use crate::metrics;

/// Drives a single request through the cache.
///
/// The engine holds no per-request state: every call to
/// [`perform`](Self::perform) reads the clock and the adapter afresh, so one
/// engine can serve concurrent requests from many tasks.
///
/// For each request it decides, in order:
///
/// 1. Unsafe methods invalidate every stored response for the request URI
///    and go straight to the executor.
/// 2. Cacheable requests look the adapter up. A fresh stored response is
///    returned without executing anything; a stale one turns the request into
///    a conditional request.
/// 3. The executor runs. A `304 Not Modified` answer to a conditional request
///    is merged into the stored response, which is stored again and returned.
///    Otherwise the response is stored when both sides allow it.
///
/// # Example
///
/// ```rust,ignore
/// let engine = CacheEngine::builder()
///     .mode(CacheMode::Private)
///     .adapter(MokaAdapter::builder(1_000).build())
///     .build()?;
///
/// let response = engine
///     .perform(request, client, |request, client| async move { client.send(request).await })
///     .await?;
/// ```
pub struct CacheEngine<A> {
    config: CacheConfig,
    adapter: Arc<A>,
}

impl<A> CacheEngine<A> {
    /// Creates an engine from a validated configuration and an adapter.
    pub fn new(config: CacheConfig, adapter: A) -> Self {
        Self::with_shared_adapter(config, Arc::new(adapter))
    }

    /// Creates an engine that shares `adapter` with other owners.
    pub fn with_shared_adapter(config: CacheConfig, adapter: Arc<A>) -> Self {
        Self { config, adapter }
    }

    /// The engine configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// The configured cache mode.
    pub fn mode(&self) -> CacheMode {
        self.config.mode
    }

    /// The cache adapter.
    pub fn adapter(&self) -> &Arc<A> {
        &self.adapter
    }
}

impl CacheEngine<NotSet> {
    /// Creates a new [`CacheEngineBuilder`].
    pub fn builder() -> CacheEngineBuilder<NotSet> {
        CacheEngineBuilder::new()
    }
}

impl<A> Clone for CacheEngine<A> {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            adapter: Arc::clone(&self.adapter),
        }
    }
}

impl<A> fmt::Debug for CacheEngine<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<A> CacheEngine<A>
where
    A: CacheAdapter,
{
    /// Performs `request` through the cache, calling `executor` with
    /// `exec_config` when the network has to be consulted.
    ///
    /// Executor and adapter failures abort the call and are returned as
    /// [`CacheError::Execution`] and [`CacheError::Adapter`]. Nothing is
    /// stored after an executor failure.
    pub async fn perform<C, E>(
        &self,
        request: Request,
        exec_config: C,
        executor: E,
    ) -> Result<Response, CacheError>
    where
        E: Executor<C>,
    {
        self.perform_with_status(request, exec_config, executor)
            .await
            .map(|(response, _)| response)
    }

    /// Same as [`perform`](Self::perform), also reporting how the response
    /// was obtained.
    #[tracing::instrument(
        name = "semcache.perform",
        skip_all,
        fields(method = %request.method, uri = %request.uri, adapter = self.adapter.name())
    )]
    pub async fn perform_with_status<C, E>(
        &self,
        request: Request,
        exec_config: C,
        executor: E,
    ) -> Result<(Response, CacheStatus), CacheError>
    where
        E: Executor<C>,
    {
        let mode = self.config.mode;
        let mut request = CacheableRequest::new(request);
        let mut candidate = None;
        let bypass = request.invalidates_cache() || request.skips_cache();

        if request.invalidates_cache() {
            debug!("Invalidating stored responses");
            self.adapter
                .invalidate(request.uri())
                .await
                .map_err(|error| self.adapter_failure("invalidate", error))?;
            metrics::record_invalidation(self.adapter.name());
        } else if request.skips_cache() {
            debug!("Request bypasses the cache");
        } else {
            let stored = self
                .adapter
                .lookup(request.request())
                .await
                .map_err(|error| self.adapter_failure("lookup", error))?;
            if let Some(stored) = stored {
                let stored = CacheableResponse::stored(stored);
                if !stored.is_stale(&request, mode) {
                    debug!("Serving fresh stored response");
                    return Ok(self.finish(stored.into_response(), CacheStatus::Hit));
                }
                let conditional = request.set_validation_headers(&stored);
                debug!(conditional, "Stored response is stale");
                candidate = Some(stored);
            }
        }

        let sent_at = Utc::now();
        request.set_sent_at(sent_at);
        let started = Instant::now();
        let result = executor
            .execute(request.request().clone(), exec_config)
            .await;
        metrics::record_upstream(started.elapsed(), result.is_ok());
        let response = result.map_err(|error| CacheError::Execution(error.into()))?;

        let mut response = CacheableResponse::new(response);
        response.set_exchange_times(sent_at, Utc::now());

        if response.is_not_modified() {
            if let Some(mut stored) = candidate {
                debug!("Stored response revalidated");
                stored.validated(&response);
                self.store(&request, &stored).await?;
                return Ok(self.finish(stored.into_response(), CacheStatus::Revalidated));
            }
        }

        if request.is_cacheable() && response.is_cacheable(mode) {
            self.store(&request, &response).await?;
            return Ok(self.finish(response.into_response(), CacheStatus::Miss));
        }

        debug!(status = %response.status(), "Response not stored");
        let status = if bypass {
            CacheStatus::Bypass
        } else {
            CacheStatus::Miss
        };
        Ok(self.finish(response.into_response(), status))
    }

    async fn store(
        &self,
        request: &CacheableRequest,
        response: &CacheableResponse,
    ) -> Result<(), CacheError> {
        self.adapter
            .store(request.request(), response.response())
            .await
            .map_err(|error| self.adapter_failure("store", error))?;
        metrics::record_store(self.adapter.name());
        Ok(())
    }

    fn finish(&self, response: Response, status: CacheStatus) -> (Response, CacheStatus) {
        metrics::record_status(status, self.adapter.name());
        (response, status)
    }

    fn adapter_failure(&self, operation: &'static str, error: AdapterError) -> CacheError {
        warn!(operation, %error, "Cache adapter call failed");
        metrics::record_adapter_error(self.adapter.name(), operation);
        CacheError::Adapter(error)
    }
}

/// Marker type for unset builder fields.
///
/// When you see `NotSet` in a compiler error, the adapter has not been set
/// on the builder yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotSet;

/// Builder for [`CacheEngine`].
///
/// Use [`CacheEngine::builder()`] to create a new builder. The adapter is
/// tracked in the type, the mode is validated by [`build`](Self::build).
pub struct CacheEngineBuilder<A> {
    mode: Option<Result<CacheMode, InvalidCacheMode>>,
    adapter: A,
}

impl CacheEngineBuilder<NotSet> {
    /// Creates a new builder with nothing set.
    pub fn new() -> Self {
        Self {
            mode: None,
            adapter: NotSet,
        }
    }
}

impl Default for CacheEngineBuilder<NotSet> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> CacheEngineBuilder<A> {
    /// Sets the cache mode.
    pub fn mode(self, mode: CacheMode) -> Self {
        Self {
            mode: Some(Ok(mode)),
            ..self
        }
    }

    /// Sets the cache mode from its textual name, `public` or `private`.
    ///
    /// An unknown name is reported by [`build`](Self::build).
    pub fn mode_name(self, mode: &str) -> Self {
        Self {
            mode: Some(mode.parse()),
            ..self
        }
    }

    /// Takes the mode from a configuration.
    pub fn config(self, config: CacheConfig) -> Self {
        self.mode(config.mode)
    }

    /// Sets the cache adapter.
    pub fn adapter<NewA>(self, adapter: NewA) -> CacheEngineBuilder<NewA> {
        CacheEngineBuilder {
            mode: self.mode,
            adapter,
        }
    }
}

impl<A> CacheEngineBuilder<A>
where
    A: CacheAdapter,
{
    /// Builds the engine.
    ///
    /// Fails with [`ConfigurationError::MissingMode`] when no mode was set and
    /// with [`ConfigurationError::InvalidMode`] when the mode name is unknown.
    pub fn build(self) -> Result<CacheEngine<A>, ConfigurationError> {
        let mode = self.mode.ok_or(ConfigurationError::MissingMode)??;
        Ok(CacheEngine::new(CacheConfig::new(mode), self.adapter))
    }
}
