//! Adapters behind trait objects forward every call to the inner adapter.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use http::{Method, StatusCode, Uri};
use semcache_backend::{AdapterResult, CacheAdapter, CacheKey};
use semcache_core::{Request, Response};

#[derive(Default)]
struct MapAdapter {
    entries: Mutex<HashMap<CacheKey, Response>>,
}

#[async_trait]
impl CacheAdapter for MapAdapter {
    async fn lookup(&self, request: &Request) -> AdapterResult<Option<Response>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(&CacheKey::from_request(request)).cloned())
    }

    async fn store(&self, request: &Request, response: &Response) -> AdapterResult<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(CacheKey::from_request(request), response.clone());
        Ok(())
    }

    async fn invalidate(&self, uri: &Uri) -> AdapterResult<()> {
        let mut entries = self.entries.lock().unwrap();
        for key in CacheKey::all_for_uri(uri) {
            entries.remove(&key);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "map"
    }
}

async fn exercise(adapter: &dyn CacheAdapter) {
    let request = Request::get(Uri::from_static("/r"));
    let response = Response::new(StatusCode::OK).with_body("body");

    assert_eq!(adapter.lookup(&request).await.unwrap(), None);
    adapter.store(&request, &response).await.unwrap();
    assert_eq!(adapter.lookup(&request).await.unwrap(), Some(response));

    adapter.invalidate(&request.uri).await.unwrap();
    assert_eq!(adapter.lookup(&request).await.unwrap(), None);
    // Invalidating an empty URI is not an error.
    adapter.invalidate(&request.uri).await.unwrap();
}

#[tokio::test]
async fn test_boxed_adapter() {
    let adapter: Box<dyn CacheAdapter> = Box::new(MapAdapter::default());
    assert_eq!(adapter.name(), "map");
    exercise(&adapter).await;
}

#[tokio::test]
async fn test_shared_adapter() {
    let adapter: Arc<dyn CacheAdapter> = Arc::new(MapAdapter::default());
    assert_eq!(adapter.name(), "map");
    exercise(&adapter).await;
}

#[test]
fn test_keys_for_uri_cover_get_and_head() {
    let uri = Uri::from_static("/r");
    let keys = CacheKey::all_for_uri(&uri);
    assert_eq!(keys[0].to_string(), "GET /r");
    assert_eq!(keys[1].to_string(), "HEAD /r");
}

#[test]
fn test_key_from_request() {
    let request = Request::new(Method::HEAD, Uri::from_static("https://example.com/r?q=1"));
    let key = CacheKey::from_request(&request);
    assert_eq!(key.method(), &Method::HEAD);
    assert_eq!(key.uri(), "https://example.com/r?q=1");
    assert_eq!(key, CacheKey::all_for_uri(&request.uri)[1]);
}
