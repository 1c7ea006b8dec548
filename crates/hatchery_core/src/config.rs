//! Coordinator configuration.

use std::time::Duration;

/// Configuration for the transaction coordinator.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum attempts per transactional unit (first try included).
    pub max_attempts: u32,

    /// Backoff before the first retry; doubles on each subsequent retry.
    pub base_backoff: Duration,

    /// Upper bound on a single backoff delay.
    pub max_backoff: Duration,

    /// Maximum duration of a single unit attempt. Exceeding it aborts the
    /// attempt and surfaces a transient error.
    pub unit_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_backoff: Duration::from_millis(10),
            max_backoff: Duration::from_millis(500),
            unit_timeout: Duration::from_secs(5),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum attempts per unit.
    #[must_use]
    pub const fn max_attempts(mut self, value: u32) -> Self {
        self.max_attempts = value;
        self
    }

    /// Sets the base backoff delay.
    #[must_use]
    pub const fn base_backoff(mut self, value: Duration) -> Self {
        self.base_backoff = value;
        self
    }

    /// Sets the backoff cap.
    #[must_use]
    pub const fn max_backoff(mut self, value: Duration) -> Self {
        self.max_backoff = value;
        self
    }

    /// Sets the per-unit deadline.
    #[must_use]
    pub const fn unit_timeout(mut self, value: Duration) -> Self {
        self.unit_timeout = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.max_attempts, 4);
        assert!(config.base_backoff < config.max_backoff);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new()
            .max_attempts(2)
            .base_backoff(Duration::from_millis(1))
            .unit_timeout(Duration::from_secs(1));
        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.base_backoff, Duration::from_millis(1));
        assert_eq!(config.unit_timeout, Duration::from_secs(1));
    }
}
