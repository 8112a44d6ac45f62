//! Retry back-off per failure kind.
//!
//! The delay for attempt `n` is `step * n`, clamped to `[floor, ceiling]`.

use std::time::Duration;

use domain::FailureKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub step: Duration,
    pub floor: Duration,
    pub ceiling: Duration,
}

/// Local storage recovers fast.
pub const STORAGE_POLICY: RetryPolicy = RetryPolicy {
    step: Duration::from_millis(500),
    floor: Duration::ZERO,
    ceiling: Duration::from_secs(30),
};

pub const NETWORK_POLICY: RetryPolicy = RetryPolicy {
    step: Duration::from_secs(2),
    floor: Duration::from_secs(1),
    ceiling: Duration::from_secs(30),
};

pub const AUTH_POLICY: RetryPolicy = RetryPolicy {
    step: Duration::from_secs(3),
    floor: Duration::from_secs(2),
    ceiling: Duration::from_secs(60),
};

pub const DEFAULT_POLICY: RetryPolicy = RetryPolicy {
    step: Duration::from_secs(1),
    floor: Duration::ZERO,
    ceiling: Duration::from_secs(30),
};

impl RetryPolicy {
    pub fn for_kind(kind: FailureKind) -> Self {
        match kind {
            FailureKind::Database | FailureKind::Storage => STORAGE_POLICY,
            FailureKind::Network => NETWORK_POLICY,
            FailureKind::Auth => AUTH_POLICY,
            FailureKind::Validation | FailureKind::Data | FailureKind::Configuration => {
                DEFAULT_POLICY
            }
        }
    }

    /// Delay before attempt `attempt_count`. Saturates instead of overflowing.
    pub fn delay(&self, attempt_count: u32) -> Duration {
        self.step
            .saturating_mul(attempt_count)
            .clamp(self.floor, self.ceiling)
    }
}
