//! Engine configuration.

use serde::{Deserialize, Serialize};

pub use semcache_core::CacheMode;

use crate::error::ConfigurationError;

/// Cache engine configuration.
///
/// Deserializes from any serde format; the mode is validated while
/// deserializing, so an unknown mode never yields a configuration value.
///
/// ```
/// use semcache::{CacheConfig, CacheMode};
///
/// let config = CacheConfig::from_mode_name("private").unwrap();
/// assert_eq!(config.mode, CacheMode::Private);
/// assert!(CacheConfig::from_mode_name("shared").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Shared or single-consumer cache semantics.
    pub mode: CacheMode,
}

impl CacheConfig {
    /// Creates a configuration for `mode`.
    pub fn new(mode: CacheMode) -> Self {
        Self { mode }
    }

    /// Creates a configuration from a textual mode name.
    pub fn from_mode_name(mode: &str) -> Result<Self, ConfigurationError> {
        Ok(Self::new(mode.parse()?))
    }
}
