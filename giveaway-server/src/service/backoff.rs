//! Backoff policies
//!
//! Decide how long run resolution waits between two status checks.

use std::time::Duration;

/// Delay to wait after a given (1-based) attempt before the next one
pub trait BackoffPolicy: Send + Sync + std::fmt::Debug {
    fn next_delay(&self, attempt: u32) -> Duration;
}

/// Same delay after every attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBackoff {
    pub interval: Duration,
}

impl FixedBackoff {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl BackoffPolicy for FixedBackoff {
    fn next_delay(&self, _attempt: u32) -> Duration {
        self.interval
    }
}

/// `initial * factor^(attempt - 1)`, capped at `max`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExponentialBackoff {
    pub initial: Duration,
    pub factor: u32,
    pub max: Duration,
}

impl ExponentialBackoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            initial,
            factor: 2,
            max,
        }
    }
}

impl BackoffPolicy for ExponentialBackoff {
    fn next_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let multiplier = self.factor.saturating_pow(exponent);
        self.initial.saturating_mul(multiplier).min(self.max)
    }
}
