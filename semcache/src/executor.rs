use std::future::Future;

use semcache_core::{Request, Response};

use crate::error::BoxError;

/// Performs the real network exchange for a request.
///
/// The engine calls an executor at most once per `perform`, with the request
/// (possibly carrying conditional headers) and the execution configuration it
/// was given. Errors are returned to the caller untouched apart from boxing.
///
/// Any `FnOnce(Request, C) -> impl Future<Output = Result<Response, E>>` is an
/// executor:
///
/// ```rust,ignore
/// let executor = |request: Request, timeout: Duration| async move {
///     client.send(request, timeout).await
/// };
/// ```
pub trait Executor<C> {
    /// Error returned when the exchange fails.
    type Error: Into<BoxError>;

    /// The future that resolves to the response.
    type Future: Future<Output = Result<Response, Self::Error>> + Send;

    /// Executes the request.
    fn execute(self, request: Request, config: C) -> Self::Future;
}

impl<F, Fut, C, E> Executor<C> for F
where
    F: FnOnce(Request, C) -> Fut,
    Fut: Future<Output = Result<Response, E>> + Send,
    E: Into<BoxError>,
{
    type Error = E;
    type Future = Fut;

    fn execute(self, request: Request, config: C) -> Self::Future {
        self(request, config)
    }
}
