//! Retry policy for generation calls.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounded retry with linear backoff.
///
/// A policy permits `max_retries` retries after the initial attempt, so
/// a call makes at most `max_retries + 1` backend calls. The wait
/// before retry *n* (1-based) is `base_delay × n`.
///
/// # Examples
///
/// ```
/// use crammer_core::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(2, Duration::from_secs(1));
/// assert_eq!(policy.max_attempts(), 3);
/// assert_eq!(policy.delay_for(2), Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Retries permitted after the initial attempt
    max_retries: u32,
    /// Backoff unit; retry n waits base_delay × n
    base_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given retry count and backoff unit.
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Retries permitted after the initial attempt.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Total backend calls this policy permits.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// The backoff unit.
    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Wait before the given retry (1-based). Linear in the retry
    /// number.
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay * retry
    }
}

impl Default for RetryPolicy {
    /// The product default: two retries with a one-second backoff unit.
    fn default() -> Self {
        Self::new(2, Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_grow_linearly() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1500));
        assert_eq!(policy.delay_for(1), Duration::from_millis(1500));
        assert_eq!(policy.delay_for(2), Duration::from_millis(3000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(4500));
    }

    #[test]
    fn attempt_budget_includes_initial_call() {
        assert_eq!(RetryPolicy::default().max_attempts(), 3);
        assert_eq!(RetryPolicy::none().max_attempts(), 1);
    }
}
