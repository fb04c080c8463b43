//! Integration tests for MokaAdapter.

use bytes::Bytes;
use chrono::{TimeDelta, Utc};
use http::header::{CACHE_CONTROL, ETAG};
use http::{HeaderValue, Method, StatusCode, Uri};
use semcache_backend::{AdapterError, CacheAdapter, CacheKey};
use semcache_core::{CacheMode, CacheableRequest, CacheableResponse, Request, Response};
use semcache_moka::MokaAdapter;

fn stored_response() -> Response {
    let received_at = Utc::now() - TimeDelta::seconds(20);
    let response = Response::new(StatusCode::OK)
        .with_header(CACHE_CONTROL, HeaderValue::from_static("max-age=60"))
        .with_header(ETAG, HeaderValue::from_static("\"abc\""))
        .with_body("hello");
    let mut response = CacheableResponse::new(response);
    response.set_exchange_times(received_at - TimeDelta::milliseconds(150), received_at);
    response.into_response()
}

#[tokio::test]
async fn test_lookup_miss() {
    let adapter = MokaAdapter::builder(100).build();
    let request = Request::get(Uri::from_static("/missing"));
    assert_eq!(adapter.lookup(&request).await.unwrap(), None);
}

#[tokio::test]
async fn test_store_lookup_round_trip() {
    let adapter = MokaAdapter::builder(100).build();
    let request = Request::get(Uri::from_static("/r"));
    let response = stored_response();

    adapter.store(&request, &response).await.unwrap();
    let restored = adapter.lookup(&request).await.unwrap().unwrap();

    assert_eq!(restored, response);

    // Only elapsed time affects staleness after the round trip.
    let now = Utc::now();
    let request = CacheableRequest::new(request);
    let original = CacheableResponse::new(response);
    let restored = CacheableResponse::stored(restored);
    assert_eq!(restored.current_age(now), original.current_age(now));
    assert_eq!(
        restored.is_stale_at(&request, CacheMode::Public, now),
        original.is_stale_at(&request, CacheMode::Public, now)
    );
    assert!(!restored.is_stale_at(&request, CacheMode::Public, now));
    assert!(restored.is_stale_at(&request, CacheMode::Public, now + TimeDelta::seconds(45)));
}

#[tokio::test]
async fn test_store_overwrites_previous_entry() {
    let adapter = MokaAdapter::builder(100).build();
    let request = Request::get(Uri::from_static("/r"));

    adapter
        .store(&request, &Response::new(StatusCode::OK).with_body("v1"))
        .await
        .unwrap();
    adapter
        .store(&request, &Response::new(StatusCode::OK).with_body("v2"))
        .await
        .unwrap();

    let restored = adapter.lookup(&request).await.unwrap().unwrap();
    assert_eq!(restored.body, Bytes::from_static(b"v2"));
}

#[tokio::test]
async fn test_invalidate_is_scoped_to_uri() {
    let adapter = MokaAdapter::builder(100).build();
    let get = Request::get(Uri::from_static("/r"));
    let head = Request::new(Method::HEAD, Uri::from_static("/r"));
    let other = Request::get(Uri::from_static("/other"));
    let response = stored_response();

    for request in [&get, &head, &other] {
        adapter.store(request, &response).await.unwrap();
    }

    adapter.invalidate(&Uri::from_static("/r")).await.unwrap();

    assert_eq!(adapter.lookup(&get).await.unwrap(), None);
    assert_eq!(adapter.lookup(&head).await.unwrap(), None);
    assert!(adapter.lookup(&other).await.unwrap().is_some());
}

#[tokio::test]
async fn test_invalidate_without_entries() {
    let adapter = MokaAdapter::builder(100).build();
    adapter
        .invalidate(&Uri::from_static("/nothing"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_corrupt_entry_is_format_error() {
    let adapter = MokaAdapter::builder(100).build();
    let request = Request::get(Uri::from_static("/r"));
    adapter
        .cache()
        .insert(
            CacheKey::from_request(&request),
            Bytes::from_static(b"not json"),
        )
        .await;

    let error = adapter.lookup(&request).await.unwrap_err();
    assert!(matches!(error, AdapterError::FormatError(_)));
}

#[tokio::test]
async fn test_label_is_adapter_name() {
    let adapter = MokaAdapter::builder(100).build();
    assert_eq!(adapter.name(), "moka");
    let adapter = MokaAdapter::builder(100).label("sessions").build();
    assert_eq!(adapter.name(), "sessions");
}
