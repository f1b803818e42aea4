use std::time::Duration;

/// Exponential backoff policy for transient fetch failures. A plain value
/// so retry behavior can be unit-tested without a network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per URL, including the first.
    pub max_attempts: u32,
    /// Floor wait before the first retry.
    pub min_wait: Duration,
    /// Ceiling wait per attempt.
    pub max_wait: Duration,
    /// Upper bound on time spent across a URL's attempts and waits.
    pub total_deadline: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            min_wait: Duration::from_secs(4),
            max_wait: Duration::from_secs(10),
            total_deadline: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Wait before the retry following `attempt` (1-based): doubles from
    /// `min_wait`, clamped to `max_wait`. Monotonically non-decreasing.
    pub fn wait_before(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.min_wait
            .saturating_mul(1u32 << exponent)
            .min(self.max_wait)
    }
}
