//! Responses and their freshness, storability and revalidation rules.
//!
//! - [`Response`] - a received or stored response with exchange timestamps
//! - [`CacheableResponse`] - a response wrapped with its parsed directives
//!
//! ## Freshness
//!
//! The freshness lifetime is taken from explicit signals only, in order:
//!
//! 1. `no-cache` - zero lifetime, every reuse needs revalidation
//! 2. `s-maxage` - shared caches ([`CacheMode::Public`]) only
//! 3. `max-age`
//! 4. `Expires` minus the date of origin (an unparsable `Expires` means
//!    already expired)
//!
//! A response without any of these has no lifetime and is always stale.
//! There is no heuristic freshness derived from `Last-Modified`.
//!
//! The age is computed as described in RFC 7234 §4.2.3 from the `Age`
//! header, the date of origin and the exchange timestamps.

use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::header::{
    AGE, CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, DATE, EXPIRES,
    TRANSFER_ENCODING,
};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde::{Deserialize, Serialize};

use crate::cache_control::{CacheControl, MaxStale, parse_delta_seconds};
use crate::date::parse_http_date;
use crate::mode::CacheMode;
use crate::request::CacheableRequest;

/// Status codes whose responses may be stored.
pub const CACHEABLE_STATUS_CODES: [StatusCode; 11] = [
    StatusCode::OK,
    StatusCode::NON_AUTHORITATIVE_INFORMATION,
    StatusCode::NO_CONTENT,
    StatusCode::MULTIPLE_CHOICES,
    StatusCode::MOVED_PERMANENTLY,
    StatusCode::PERMANENT_REDIRECT,
    StatusCode::NOT_FOUND,
    StatusCode::METHOD_NOT_ALLOWED,
    StatusCode::GONE,
    StatusCode::URI_TOO_LONG,
    StatusCode::NOT_IMPLEMENTED,
];

/// Headers describing the stored body; a `304 Not Modified` never replaces them.
const BODY_HEADERS: [HeaderName; 5] = [
    CONTENT_LENGTH,
    CONTENT_ENCODING,
    CONTENT_TYPE,
    CONTENT_RANGE,
    TRANSFER_ENCODING,
];

/// An HTTP response with the timestamps of the exchange that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Response status.
    #[serde(with = "http_serde::status_code")]
    pub status: StatusCode,
    /// Response headers.
    #[serde(with = "http_serde::header_map")]
    pub headers: HeaderMap,
    /// Response body.
    pub body: Bytes,
    /// Dispatch time of the request that produced this response.
    pub requested_at: Option<DateTime<Utc>>,
    /// Time the response became available.
    pub received_at: Option<DateTime<Utc>>,
    /// Date of origin: the `Date` header, or `received_at` without one.
    pub date: Option<DateTime<Utc>>,
    /// Time of the last successful revalidation.
    pub revalidated_at: Option<DateTime<Utc>>,
}

impl Response {
    /// Creates a response with no headers and an empty body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            requested_at: None,
            received_at: None,
            date: None,
            revalidated_at: None,
        }
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

    /// Converts the response into an [`http::Response`].
    pub fn into_http(self) -> http::Response<Bytes> {
        let mut response = http::Response::new(self.body);
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl From<http::Response<Bytes>> for Response {
    fn from(response: http::Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();
        Self {
            status: parts.status,
            headers: parts.headers,
            body,
            ..Self::new(StatusCode::OK)
        }
    }
}

/// A response together with the directives that drive caching decisions.
///
/// Use [`new`](Self::new) for a response that just arrived from the network
/// and [`stored`](Self::stored) for one read back from a cache adapter.
#[derive(Debug, Clone)]
pub struct CacheableResponse {
    response: Response,
    cache_control: CacheControl,
    clock: Option<ExchangeClock>,
}

/// Timestamps the age of a response is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ExchangeClock {
    requested_at: DateTime<Utc>,
    received_at: DateTime<Utc>,
    date: DateTime<Utc>,
}

impl ExchangeClock {
    /// Clock of `response` built from what it carries, never from the current
    /// time. `None` without exchange timestamps and without a `Date` header.
    fn of(response: &Response) -> Option<Self> {
        let date = response.date.or_else(|| header_date(&response.headers));
        let received_at = response.received_at.or(date)?;
        Some(Self {
            requested_at: response.requested_at.unwrap_or(received_at),
            received_at,
            date: date.unwrap_or(received_at),
        })
    }
}

impl CacheableResponse {
    /// Wraps a response that was just received.
    ///
    /// Missing timestamps are filled in: `received_at` defaults to now,
    /// `requested_at` to `received_at`, and the date of origin to the `Date`
    /// header or `received_at`.
    pub fn new(mut response: Response) -> Self {
        let received_at = *response.received_at.get_or_insert_with(Utc::now);
        response.requested_at.get_or_insert(received_at);
        if response.date.is_none() {
            response.date = Some(date_of_origin(&response.headers, received_at));
        }
        Self::stored(response)
    }

    /// Wraps a response read back from a cache adapter, leaving it untouched.
    ///
    /// The age is computed from the stored exchange timestamps, falling back
    /// to the `Date` header. A response with neither has no known age and is
    /// always stale.
    pub fn stored(response: Response) -> Self {
        let cache_control = CacheControl::from_headers(&response.headers);
        let clock = ExchangeClock::of(&response);
        Self {
            response,
            cache_control,
            clock,
        }
    }

    /// The wrapped response.
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// Unwraps the response.
    pub fn into_response(self) -> Response {
        self.response
    }

    /// Response directives.
    pub fn cache_control(&self) -> &CacheControl {
        &self.cache_control
    }

    /// Response status.
    pub fn status(&self) -> StatusCode {
        self.response.status
    }

    /// Returns `true` for `304 Not Modified`.
    pub fn is_not_modified(&self) -> bool {
        self.response.status == StatusCode::NOT_MODIFIED
    }

    /// Time the response became available, if known.
    pub fn received_at(&self) -> Option<DateTime<Utc>> {
        self.clock.map(|clock| clock.received_at)
    }

    /// Dispatch time of the request that produced this response, if known.
    pub fn requested_at(&self) -> Option<DateTime<Utc>> {
        self.clock.map(|clock| clock.requested_at)
    }

    /// Date of origin, if known.
    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.clock.map(|clock| clock.date)
    }

    /// Records the timestamps of the exchange that produced this response and
    /// re-derives the date of origin from them.
    pub fn set_exchange_times(
        &mut self,
        requested_at: DateTime<Utc>,
        received_at: DateTime<Utc>,
    ) {
        let date = date_of_origin(&self.response.headers, received_at);
        self.response.requested_at = Some(requested_at);
        self.response.received_at = Some(received_at);
        self.response.date = Some(date);
        self.clock = Some(ExchangeClock {
            requested_at,
            received_at,
            date,
        });
    }

    /// Freshness lifetime under the given cache mode, `None` if the response
    /// carries no freshness signal.
    pub fn freshness_lifetime(&self, mode: CacheMode) -> Option<Duration> {
        if self.cache_control.no_cache() {
            return Some(Duration::ZERO);
        }
        if mode.is_shared() {
            if let Some(s_maxage) = self.cache_control.s_maxage() {
                return Some(s_maxage);
            }
        }
        if let Some(max_age) = self.cache_control.max_age() {
            return Some(max_age);
        }
        let expires = self.response.headers.get(EXPIRES)?;
        let lifetime = expires
            .to_str()
            .ok()
            .and_then(parse_http_date)
            .and_then(|expires| (expires - self.date()?).to_std().ok())
            .unwrap_or(Duration::ZERO);
        Some(lifetime)
    }

    /// Current age of the response at `now`, `None` when the response carries
    /// no timestamps to compute it from.
    pub fn current_age(&self, now: DateTime<Utc>) -> Option<Duration> {
        let clock = self.clock?;
        let apparent_age = elapsed(clock.date, clock.received_at);
        let response_delay = elapsed(clock.requested_at, clock.received_at);
        let corrected_age_value = self.age_header().saturating_add(response_delay);
        let corrected_initial_age = apparent_age.max(corrected_age_value);
        Some(corrected_initial_age.saturating_add(elapsed(clock.received_at, now)))
    }

    /// Returns `true` if the response may not be reused for `request` without
    /// revalidation.
    pub fn is_stale(&self, request: &CacheableRequest, mode: CacheMode) -> bool {
        self.is_stale_at(request, mode, Utc::now())
    }

    /// [`is_stale`](Self::is_stale) evaluated at a given instant.
    ///
    /// Request directives narrow or widen the acceptable age: `max-age` caps
    /// it, `min-fresh` demands remaining freshness and `max-stale` tolerates
    /// staleness unless the response requires revalidation.
    pub fn is_stale_at(
        &self,
        request: &CacheableRequest,
        mode: CacheMode,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(lifetime) = self.freshness_lifetime(mode) else {
            return true;
        };
        let Some(age) = self.current_age(now) else {
            return true;
        };
        let directives = request.cache_control();
        if directives.max_age().is_some_and(|max_age| age >= max_age) {
            return true;
        }
        let required_age = age.saturating_add(directives.min_fresh().unwrap_or_default());
        let tolerance = if self.requires_revalidation(mode) {
            Some(Duration::ZERO)
        } else {
            match directives.max_stale() {
                Some(MaxStale::Any) => None,
                Some(MaxStale::Limit(limit)) => Some(limit),
                None => Some(Duration::ZERO),
            }
        };
        match tolerance {
            Some(tolerance) => required_age >= lifetime.saturating_add(tolerance),
            None => false,
        }
    }

    /// Returns `true` if the response may be stored by a cache in `mode`.
    pub fn is_cacheable(&self, mode: CacheMode) -> bool {
        CACHEABLE_STATUS_CODES.contains(&self.response.status)
            && !self.cache_control.no_store()
            && !(mode.is_shared() && self.cache_control.is_private())
    }

    /// Merges a `304 Not Modified` revalidation response into this one.
    ///
    /// Every header present on `fresh` replaces the stored one, except the
    /// headers describing the body. A stored `Age` is dropped unless `fresh`
    /// carries a new one. The exchange timestamps and the date of origin are
    /// taken from `fresh`, restarting the freshness clock. The body is never
    /// touched.
    pub fn validated(&mut self, fresh: &CacheableResponse) {
        let headers = &mut self.response.headers;
        headers.remove(AGE);
        for name in fresh.response.headers.keys() {
            if BODY_HEADERS.contains(name) {
                continue;
            }
            headers.remove(name);
            for value in fresh.response.headers.get_all(name) {
                headers.append(name.clone(), value.clone());
            }
        }
        self.response.requested_at = fresh.response.requested_at;
        self.response.received_at = fresh.response.received_at;
        self.response.date = fresh.response.date;
        self.response.revalidated_at = fresh.response.received_at;
        self.clock = fresh.clock;
        self.cache_control = CacheControl::from_headers(&self.response.headers);
    }

    fn requires_revalidation(&self, mode: CacheMode) -> bool {
        self.cache_control.must_revalidate()
            || self.cache_control.no_cache()
            || (mode.is_shared() && self.cache_control.proxy_revalidate())
    }

    fn age_header(&self) -> Duration {
        self.response
            .headers
            .get_all(AGE)
            .iter()
            .filter_map(|value| parse_delta_seconds(value.to_str().ok()?.trim()))
            .max()
            .unwrap_or_default()
    }
}

fn date_of_origin(headers: &HeaderMap, received_at: DateTime<Utc>) -> DateTime<Utc> {
    header_date(headers).unwrap_or(received_at)
}

fn header_date(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    headers
        .get(DATE)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_http_date)
}

/// Non-negative time between `from` and `to`.
fn elapsed(from: DateTime<Utc>, to: DateTime<Utc>) -> Duration {
    (to - from).to_std().unwrap_or_default()
}
