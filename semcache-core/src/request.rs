//! Requests and their cache-relevant classification.
//!
//! - [`Request`] - the outgoing request value handed to executors and adapters
//! - [`CacheableRequest`] - a request wrapped with its parsed directives
//!
//! ## Classification
//!
//! | method                   | invalidates | lookup | storable |
//! |--------------------------|-------------|--------|----------|
//! | `GET`, `HEAD`            | no          | yes    | yes      |
//! | `OPTIONS`, `TRACE`       | no          | no     | no       |
//! | `POST`, `PUT`, `DELETE`… | yes         | no     | no       |
//!
//! A `no-cache` or `no-store` request directive (or `Pragma: no-cache`)
//! additionally disables lookup and storage for `GET`/`HEAD`.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::header::{ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED};
use http::{HeaderMap, HeaderName, HeaderValue, Method, Uri};
use serde::{Deserialize, Serialize};

use crate::cache_control::CacheControl;
use crate::response::CacheableResponse;

/// An outgoing HTTP request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Request method.
    #[serde(with = "http_serde::method")]
    pub method: Method,
    /// Target URI.
    #[serde(with = "http_serde::uri")]
    pub uri: Uri,
    /// Request headers.
    #[serde(with = "http_serde::header_map")]
    pub headers: HeaderMap,
    /// Request body.
    pub body: Bytes,
    /// Dispatch time, assigned right before the request is executed.
    pub sent_at: Option<DateTime<Utc>>,
}

impl Request {
    /// Creates a request with no headers and an empty body.
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            sent_at: None,
        }
    }

    /// Creates a `GET` request.
    pub fn get(uri: Uri) -> Self {
        Self::new(Method::GET, uri)
    }

    /// Appends a header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Replaces the body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Converts the request into an [`http::Request`].
    pub fn into_http(self) -> http::Request<Bytes> {
        let mut request = http::Request::new(self.body);
        *request.method_mut() = self.method;
        *request.uri_mut() = self.uri;
        *request.headers_mut() = self.headers;
        request
    }
}

impl From<http::Request<Bytes>> for Request {
    fn from(request: http::Request<Bytes>) -> Self {
        let (parts, body) = request.into_parts();
        Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
            sent_at: None,
        }
    }
}

/// A request together with the directives that drive caching decisions.
#[derive(Debug, Clone)]
pub struct CacheableRequest {
    request: Request,
    cache_control: CacheControl,
}

impl CacheableRequest {
    /// Wraps a request, parsing its `Cache-Control` and `Pragma` headers.
    pub fn new(request: Request) -> Self {
        let cache_control = CacheControl::from_request_headers(&request.headers);
        Self {
            request,
            cache_control,
        }
    }

    /// The wrapped request.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Unwraps the request.
    pub fn into_request(self) -> Request {
        self.request
    }

    /// Request directives.
    pub fn cache_control(&self) -> &CacheControl {
        &self.cache_control
    }

    /// Request method.
    pub fn method(&self) -> &Method {
        &self.request.method
    }

    /// Request URI.
    pub fn uri(&self) -> &Uri {
        &self.request.uri
    }

    /// Dispatch time, if the request was already sent.
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        self.request.sent_at
    }

    /// Records the dispatch time.
    pub fn set_sent_at(&mut self, sent_at: DateTime<Utc>) {
        self.request.sent_at = Some(sent_at);
    }

    /// Returns `true` for state-changing methods whose success makes stored
    /// responses for the same URI obsolete.
    pub fn invalidates_cache(&self) -> bool {
        !self.request.method.is_safe()
    }

    /// Returns `true` if the cache must not be consulted for this request.
    pub fn skips_cache(&self) -> bool {
        !self.is_retrievable_method()
            || self.cache_control.no_cache()
            || self.cache_control.no_store()
    }

    /// Returns `true` if a response to this request may be stored.
    pub fn is_cacheable(&self) -> bool {
        !self.skips_cache()
    }

    /// Adds conditional headers built from the validators of a stale cached
    /// response.
    ///
    /// `ETag` becomes `If-None-Match` and `Last-Modified` becomes
    /// `If-Modified-Since`. Returns `false` and leaves the request untouched
    /// when the cached response has no validators.
    pub fn set_validation_headers(&mut self, cached: &CacheableResponse) -> bool {
        let headers = &cached.response().headers;
        let mut conditional = false;
        if let Some(etag) = headers.get(ETAG) {
            self.request.headers.insert(IF_NONE_MATCH, etag.clone());
            conditional = true;
        }
        if let Some(last_modified) = headers.get(LAST_MODIFIED) {
            self.request
                .headers
                .insert(IF_MODIFIED_SINCE, last_modified.clone());
            conditional = true;
        }
        conditional
    }

    fn is_retrievable_method(&self) -> bool {
        matches!(self.request.method, Method::GET | Method::HEAD)
    }
}
