//! Retry policies for HTTP requests.
//!
//! Every Pricewatch endpoint is a GET, so the client applies one policy to all
//! of them; it is chosen once on the builder.

use std::time::Duration;

/// Retry policy for HTTP requests.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Single attempt; failures surface immediately.
    None,
    /// Retry on transport failures, 429 and 502/503/504 with exponential backoff.
    #[default]
    Idempotent,
    /// User-provided retry logic.
    Custom(RetryConfig),
}

/// Backoff parameters.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the initial request.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Delay multiplier per attempt.
    pub backoff_factor: f64,
    /// ±25% random spread on each delay.
    pub jitter: bool,
    /// HTTP status codes that trigger a retry.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// The config behind [`RetryPolicy::Idempotent`].
    pub fn idempotent() -> Self {
        Self {
            retryable_statuses: vec![429, 502, 503, 504],
            ..Self::default()
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    /// Delay before retry number `attempt` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_millis() as f64 * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let spread = capped * 0.25;
            (capped + (rand::random::<f64>() - 0.5) * 2.0 * spread).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_idempotent() {
        assert!(matches!(RetryPolicy::default(), RetryPolicy::Idempotent));
    }

    #[test]
    fn test_idempotent_includes_429() {
        let config = RetryConfig::idempotent();
        for status in [429, 502, 503, 504] {
            assert!(config.retryable_statuses.contains(&status));
        }
        assert!(!RetryConfig::default().retryable_statuses.contains(&429));
    }

    #[test]
    fn test_exponential_delay_without_jitter() {
        let config = RetryConfig {
            initial_delay: Duration::from_millis(100),
            ..RetryConfig::default()
        }
        .without_jitter();
        assert_eq!(config.delay_for_attempt(0).as_millis(), 100);
        assert_eq!(config.delay_for_attempt(1).as_millis(), 200);
        assert_eq!(config.delay_for_attempt(2).as_millis(), 400);
    }

    #[test]
    fn test_delay_caps_at_max() {
        let config = RetryConfig {
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(2000),
            backoff_factor: 10.0,
            ..RetryConfig::default()
        }
        .without_jitter();
        assert_eq!(config.delay_for_attempt(3).as_millis(), 2000);
    }

    #[test]
    fn test_jitter_stays_within_spread() {
        let config = RetryConfig::default().with_max_retries(1);
        for _ in 0..50 {
            let ms = config.delay_for_attempt(0).as_millis();
            assert!((150..=250).contains(&ms), "delay {ms} out of range");
        }
    }
}
