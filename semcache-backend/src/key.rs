//! Default cache key for adapter implementations.

use std::fmt;

use http::{Method, Uri};
use semcache_core::Request;

/// Cache key made of the request method and the full URI.
///
/// Adapters are free to key entries however they like; this is the scheme
/// the bundled adapters use. Two requests map to the same key when their
/// methods and URIs are equal, headers are not part of the key.
///
/// ```
/// use http::{Method, Uri};
/// use semcache_backend::CacheKey;
///
/// let key = CacheKey::new(Method::GET, Uri::from_static("https://example.com/r?q=1"));
/// assert_eq!(key.to_string(), "GET https://example.com/r?q=1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    method: Method,
    uri: Uri,
}

impl CacheKey {
    /// Creates a key from its parts.
    pub fn new(method: Method, uri: Uri) -> Self {
        Self { method, uri }
    }

    /// Key of a request.
    pub fn from_request(request: &Request) -> Self {
        Self::new(request.method.clone(), request.uri.clone())
    }

    /// Keys of every entry the bundled adapters may hold for `uri`.
    ///
    /// Only `GET` and `HEAD` responses are ever stored.
    pub fn all_for_uri(uri: &Uri) -> [CacheKey; 2] {
        [
            Self::new(Method::GET, uri.clone()),
            Self::new(Method::HEAD, uri.clone()),
        ]
    }

    /// Request method part.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// URI part.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.uri)
    }
}
