//! Outcome of a single `perform` call.

use std::fmt;

/// How the response returned by the engine was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheStatus {
    /// A fresh stored response was returned, the executor was not called.
    Hit,
    /// The request was executed after looking up the cache.
    Miss,
    /// A stale stored response was confirmed by `304 Not Modified`.
    Revalidated,
    /// The cache was not consulted: the request skips or invalidates it.
    Bypass,
}

impl CacheStatus {
    /// Returns the status as an upper-case label (`HIT`, `MISS`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
            CacheStatus::Revalidated => "REVALIDATED",
            CacheStatus::Bypass => "BYPASS",
        }
    }
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
