//! Builder for configuring [`MokaAdapter`].

use std::time::Duration;

use moka::future::CacheBuilder;

use crate::adapter::MokaAdapter;

/// Builder for creating and configuring a [`MokaAdapter`].
///
/// Use [`MokaAdapter::builder`] to create a new builder instance.
///
/// ```
/// use std::time::Duration;
/// use semcache_moka::MokaAdapter;
///
/// let adapter = MokaAdapter::builder(1_000)
///     .label("sessions")
///     .time_to_idle(Duration::from_secs(600))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct MokaAdapterBuilder {
    max_capacity: u64,
    time_to_idle: Option<Duration>,
    label: String,
}

impl MokaAdapterBuilder {
    pub(crate) fn new(max_capacity: u64) -> Self {
        Self {
            max_capacity,
            time_to_idle: None,
            label: "moka".to_owned(),
        }
    }

    /// Evicts entries that were not read or written for `duration`.
    ///
    /// This only bounds memory, freshness is still decided by the engine.
    pub fn time_to_idle(mut self, duration: Duration) -> Self {
        self.time_to_idle = Some(duration);
        self
    }

    /// Sets the label reported by [`CacheAdapter::name`](semcache_backend::CacheAdapter::name).
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Builds the adapter.
    pub fn build(self) -> MokaAdapter {
        let mut builder = CacheBuilder::new(self.max_capacity);
        if let Some(duration) = self.time_to_idle {
            builder = builder.time_to_idle(duration);
        }
        MokaAdapter {
            cache: builder.build(),
            label: self.label,
        }
    }
}
