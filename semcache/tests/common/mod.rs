#![allow(dead_code)]

use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::{DashMap, DashSet};
use http::header::CACHE_CONTROL;
use http::{HeaderValue, Method, StatusCode, Uri};
use semcache::{AdapterError, AdapterResult, CacheAdapter, CacheKey, Executor, Request, Response};

#[derive(Debug, Default)]
pub struct AdapterCounters {
    pub lookup_count: AtomicUsize,
    pub store_count: AtomicUsize,
    pub invalidate_count: AtomicUsize,
}

/// In-memory adapter counting every call.
#[derive(Clone, Debug, Default)]
pub struct MockAdapter {
    pub entries: Arc<DashMap<CacheKey, Response>>,
    pub counters: Arc<AdapterCounters>,
    pub invalidated: Arc<Mutex<Vec<Uri>>>,
    failing: Arc<DashSet<&'static str>>,
}

impl MockAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call of `operation` (`lookup`, `store`, `invalidate`) fail.
    pub fn fail_on(self, operation: &'static str) -> Self {
        self.failing.insert(operation);
        self
    }

    pub fn insert(&self, method: Method, uri: &'static str, response: Response) {
        self.entries
            .insert(CacheKey::new(method, Uri::from_static(uri)), response);
    }

    pub fn get(&self, method: Method, uri: &'static str) -> Option<Response> {
        self.entries
            .get(&CacheKey::new(method, Uri::from_static(uri)))
            .map(|entry| entry.value().clone())
    }

    pub fn lookup_count(&self) -> usize {
        self.counters.lookup_count.load(Ordering::SeqCst)
    }

    pub fn store_count(&self) -> usize {
        self.counters.store_count.load(Ordering::SeqCst)
    }

    pub fn invalidate_count(&self) -> usize {
        self.counters.invalidate_count.load(Ordering::SeqCst)
    }

    pub fn invalidated_uris(&self) -> Vec<Uri> {
        self.invalidated.lock().unwrap().clone()
    }

    fn check(&self, operation: &'static str) -> AdapterResult<()> {
        if self.failing.contains(operation) {
            return Err(AdapterError::ConnectionError(
                format!("{operation} failed").into(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheAdapter for MockAdapter {
    async fn lookup(&self, request: &Request) -> AdapterResult<Option<Response>> {
        self.counters.lookup_count.fetch_add(1, Ordering::SeqCst);
        self.check("lookup")?;
        Ok(self
            .entries
            .get(&CacheKey::from_request(request))
            .map(|entry| entry.value().clone()))
    }

    async fn store(&self, request: &Request, response: &Response) -> AdapterResult<()> {
        self.counters.store_count.fetch_add(1, Ordering::SeqCst);
        self.check("store")?;
        self.entries
            .insert(CacheKey::from_request(request), response.clone());
        Ok(())
    }

    async fn invalidate(&self, uri: &Uri) -> AdapterResult<()> {
        self.counters.invalidate_count.fetch_add(1, Ordering::SeqCst);
        self.check("invalidate")?;
        self.invalidated.lock().unwrap().push(uri.clone());
        for key in CacheKey::all_for_uri(uri) {
            self.entries.remove(&key);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Upstream stand-in recording what the engine sends.
#[derive(Clone, Debug, Default)]
pub struct Upstream {
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl Upstream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executor answering with `response`.
    pub fn respond<C>(&self, response: Response) -> impl Executor<C, Error = Infallible> {
        let upstream = self.clone();
        move |request: Request, _config: C| {
            upstream.calls.fetch_add(1, Ordering::SeqCst);
            upstream.requests.lock().unwrap().push(request);
            std::future::ready(Ok::<_, Infallible>(response))
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<Request> {
        self.requests.lock().unwrap().last().cloned()
    }
}

pub fn request(method: Method, uri: &'static str) -> Request {
    Request::new(method, Uri::from_static(uri))
}

pub fn get(uri: &'static str) -> Request {
    request(Method::GET, uri)
}

pub fn response(status: StatusCode, cache_control: &'static str) -> Response {
    Response::new(status).with_header(CACHE_CONTROL, HeaderValue::from_static(cache_control))
}

/// Response that was received `seconds` ago.
pub fn aged(mut response: Response, seconds: i64) -> Response {
    let at: DateTime<Utc> = Utc::now() - TimeDelta::seconds(seconds);
    response.requested_at = Some(at);
    response.received_at = Some(at);
    response.date = Some(at);
    response
}
