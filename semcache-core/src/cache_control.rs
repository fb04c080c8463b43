//! Cache-Control directive parsing.
//!
//! [`CacheControl`] is a pure value type describing the directives carried by
//! one or more `Cache-Control` header values of a request or a response.
//!
//! Parsing is lenient:
//!
//! - Directive names are matched case-insensitively.
//! - The first occurrence of a directive wins, later duplicates are ignored.
//! - Malformed directives (empty tokens, non-numeric arguments where a number
//!   is expected) are skipped instead of failing the whole header.
//! - Unknown directives are ignored.
//!
//! ```
//! use semcache_core::CacheControl;
//! use std::time::Duration;
//!
//! let cc = CacheControl::parse("Max-Age=60, must-revalidate, max-age=10");
//! assert_eq!(cc.max_age(), Some(Duration::from_secs(60)));
//! assert!(cc.must_revalidate());
//! ```

use std::time::Duration;

use http::HeaderMap;
use http::header::{CACHE_CONTROL, PRAGMA};

/// Tolerance for stale responses requested via the `max-stale` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxStale {
    /// Bare `max-stale`: a stale response of any age is acceptable.
    Any,
    /// `max-stale=N`: staleness up to `N` seconds is acceptable.
    Limit(Duration),
}

/// Set of Cache-Control directives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheControl {
    max_age: Option<Duration>,
    s_maxage: Option<Duration>,
    min_fresh: Option<Duration>,
    max_stale: Option<MaxStale>,
    no_store: bool,
    no_cache: bool,
    must_revalidate: bool,
    proxy_revalidate: bool,
    private: bool,
    public: bool,
}

impl CacheControl {
    /// Parses a single `Cache-Control` header value.
    pub fn parse(value: &str) -> Self {
        let mut directives = Self::default();
        directives.extend_from_str(value);
        directives
    }

    /// Collects directives from every `Cache-Control` header in `headers`.
    ///
    /// Header values that are not valid visible ASCII are skipped.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut directives = Self::default();
        for value in headers.get_all(CACHE_CONTROL) {
            if let Ok(value) = value.to_str() {
                directives.extend_from_str(value);
            }
        }
        directives
    }

    /// Collects request directives, honoring `Pragma: no-cache`.
    ///
    /// `Pragma` is only consulted when the request carries no `Cache-Control`
    /// header at all.
    pub fn from_request_headers(headers: &HeaderMap) -> Self {
        let mut directives = Self::from_headers(headers);
        if !headers.contains_key(CACHE_CONTROL) {
            let pragma_no_cache = headers
                .get_all(PRAGMA)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .flat_map(split_directives)
                .any(|token| token.trim().eq_ignore_ascii_case("no-cache"));
            directives.no_cache |= pragma_no_cache;
        }
        directives
    }

    fn extend_from_str(&mut self, value: &str) {
        for directive in split_directives(value) {
            self.apply(directive);
        }
    }

    fn apply(&mut self, directive: &str) {
        let (name, argument) = match directive.split_once('=') {
            Some((name, argument)) => (name.trim(), Some(argument.trim())),
            None => (directive.trim(), None),
        };
        if name.is_empty() {
            return;
        }
        match name.to_ascii_lowercase().as_str() {
            "max-age" => set_seconds(&mut self.max_age, argument),
            "s-maxage" => set_seconds(&mut self.s_maxage, argument),
            "min-fresh" => set_seconds(&mut self.min_fresh, argument),
            "max-stale" => {
                if self.max_stale.is_none() {
                    self.max_stale = match argument {
                        None => Some(MaxStale::Any),
                        Some(argument) => parse_seconds(argument).map(MaxStale::Limit),
                    };
                }
            }
            // `no-cache="field"` and `private="field"` restrict single fields,
            // they are treated as the unqualified directive.
            "no-store" => self.no_store = true,
            "no-cache" => self.no_cache = true,
            "must-revalidate" => self.must_revalidate = true,
            "proxy-revalidate" => self.proxy_revalidate = true,
            "private" => self.private = true,
            "public" => self.public = true,
            _ => {}
        }
    }

    /// `max-age` freshness lifetime.
    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
    }

    /// `s-maxage` freshness lifetime for shared caches.
    pub fn s_maxage(&self) -> Option<Duration> {
        self.s_maxage
    }

    /// `min-fresh` request directive.
    pub fn min_fresh(&self) -> Option<Duration> {
        self.min_fresh
    }

    /// `max-stale` request directive.
    pub fn max_stale(&self) -> Option<MaxStale> {
        self.max_stale
    }

    /// `no-store` is present.
    pub fn no_store(&self) -> bool {
        self.no_store
    }

    /// `no-cache` is present.
    pub fn no_cache(&self) -> bool {
        self.no_cache
    }

    /// `must-revalidate` is present.
    pub fn must_revalidate(&self) -> bool {
        self.must_revalidate
    }

    /// `proxy-revalidate` is present.
    pub fn proxy_revalidate(&self) -> bool {
        self.proxy_revalidate
    }

    /// `private` is present.
    pub fn is_private(&self) -> bool {
        self.private
    }

    /// `public` is present.
    pub fn is_public(&self) -> bool {
        self.public
    }

    /// Returns `true` if no known directive was found.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn set_seconds(slot: &mut Option<Duration>, argument: Option<&str>) {
    if slot.is_none() {
        *slot = argument.and_then(parse_seconds);
    }
}

fn parse_seconds(argument: &str) -> Option<Duration> {
    let argument = argument
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(argument);
    parse_delta_seconds(argument)
}

/// Value used for a delta-seconds that overflows (RFC 7234 §1.2.1).
const DELTA_SECONDS_OVERFLOW: u64 = 1 << 31;

/// Parses a delta-seconds value: one or more ASCII digits.
///
/// Values too large to represent saturate to 2^31 seconds.
pub(crate) fn parse_delta_seconds(value: &str) -> Option<Duration> {
    if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let seconds = value.parse::<u64>().unwrap_or(DELTA_SECONDS_OVERFLOW);
    Some(Duration::from_secs(seconds))
}

/// Splits a header value on commas that are not inside a quoted string.
fn split_directives(value: &str) -> Vec<&str> {
    let mut directives = Vec::new();
    let mut quoted = false;
    let mut start = 0;
    for (index, ch) in value.char_indices() {
        match ch {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                directives.push(&value[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    directives.push(&value[start..]);
    directives
}
