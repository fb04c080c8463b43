//! Error types for adapter operations.

use thiserror::Error;

/// Error type for cache adapter operations.
///
/// Groups the failures an adapter may report so callers can tell storage
/// faults apart from network faults of remote stores.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Internal adapter error, state or computation error.
    ///
    /// Any error not related to network interaction.
    #[error(transparent)]
    InternalError(Box<dyn std::error::Error + Send + Sync>),

    /// Network interaction error.
    ///
    /// Errors occurring during communication with remote stores.
    #[error(transparent)]
    ConnectionError(Box<dyn std::error::Error + Send + Sync>),

    /// Serialization or deserialization of a stored entry failed.
    #[error(transparent)]
    FormatError(#[from] serde_json::Error),
}
