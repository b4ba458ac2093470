//! Tracker configuration.

use std::time::Duration;

/// Default number of buffered views above which a flush is triggered.
pub const DEFAULT_MAX_COUNT: usize = 20;

/// Default age of the oldest buffered view above which a flush is triggered.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_millis(120_000);

/// When a recorded view triggers a flush.
///
/// A flush fires when the buffer holds **more than** `max_count` views, or
/// when the oldest buffered view is **older than** `max_age`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlushPolicy {
    /// Count threshold (exclusive).
    pub max_count: usize,
    /// Age threshold (exclusive).
    pub max_age: Duration,
}

impl FlushPolicy {
    /// Creates a policy.
    #[must_use]
    pub const fn new(max_count: usize, max_age: Duration) -> Self {
        Self { max_count, max_age }
    }
}

impl Default for FlushPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_COUNT, DEFAULT_MAX_AGE)
    }
}

/// Configuration for a [`crate::Tracker`].
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Flush triggers.
    pub policy: FlushPolicy,

    /// Whether to log every recorded view and flushed payload.
    pub verbose: bool,

    /// Upper bound on buffered views. `None` means unbounded.
    ///
    /// When set, the oldest views are dropped to make room; recording never
    /// fails or blocks because of it.
    pub max_buffered: Option<usize>,

    /// Whether closing the tracker persists views still in the buffer.
    pub persist_on_shutdown: bool,

    /// Whether views recovered at setup are flushed right away instead of
    /// waiting for the next trigger.
    pub flush_restored: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            policy: FlushPolicy::default(),
            verbose: false,
            max_buffered: None,
            persist_on_shutdown: true,
            flush_restored: false,
        }
    }
}

impl TrackerConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flush policy.
    #[must_use]
    pub const fn policy(mut self, policy: FlushPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets verbose logging.
    #[must_use]
    pub const fn verbose(mut self, value: bool) -> Self {
        self.verbose = value;
        self
    }

    /// Bounds the buffer to `max` views.
    #[must_use]
    pub const fn max_buffered(mut self, max: usize) -> Self {
        self.max_buffered = Some(max);
        self
    }

    /// Sets whether the buffer is persisted on close.
    #[must_use]
    pub const fn persist_on_shutdown(mut self, value: bool) -> Self {
        self.persist_on_shutdown = value;
        self
    }

    /// Sets whether recovered views are flushed at setup.
    #[must_use]
    pub const fn flush_restored(mut self, value: bool) -> Self {
        self.flush_restored = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = TrackerConfig::default();
        assert_eq!(config.policy.max_count, 20);
        assert_eq!(config.policy.max_age, Duration::from_secs(120));
        assert!(!config.verbose);
        assert!(config.max_buffered.is_none());
        assert!(config.persist_on_shutdown);
        assert!(!config.flush_restored);
    }

    #[test]
    fn builder_pattern() {
        let config = TrackerConfig::new()
            .policy(FlushPolicy::new(5, Duration::from_secs(1)))
            .verbose(true)
            .max_buffered(100)
            .persist_on_shutdown(false)
            .flush_restored(true);

        assert_eq!(config.policy.max_count, 5);
        assert!(config.verbose);
        assert_eq!(config.max_buffered, Some(100));
        assert!(!config.persist_on_shutdown);
        assert!(config.flush_restored);
    }
}
