//! Cache mode: shared versus single-consumer cache semantics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which kind of cache the engine acts as.
///
/// | response directive | `Public`      | `Private`     |
/// |--------------------|---------------|---------------|
/// | none / `public`    | storable      | storable      |
/// | `private`          | not storable  | storable      |
/// | `no-store`         | not storable  | not storable  |
/// | `s-maxage=N`       | lifetime `N`  | ignored       |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum CacheMode {
    /// Shared cache: responses marked `private` are never stored.
    Public,
    /// Single-consumer cache: responses marked `private` may be stored.
    Private,
}

impl CacheMode {
    /// Returns `true` for shared-cache semantics.
    pub fn is_shared(self) -> bool {
        matches!(self, CacheMode::Public)
    }

    /// Returns the canonical lowercase name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            CacheMode::Public => "public",
            CacheMode::Private => "private",
        }
    }
}

impl fmt::Display for CacheMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cache mode name outside of `{public, private}`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid cache mode `{0}`, expected `public` or `private`")]
pub struct InvalidCacheMode(pub String);

impl FromStr for CacheMode {
    type Err = InvalidCacheMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(CacheMode::Public),
            "private" => Ok(CacheMode::Private),
            _ => Err(InvalidCacheMode(value.to_owned())),
        }
    }
}

impl TryFrom<String> for CacheMode {
    type Error = InvalidCacheMode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
