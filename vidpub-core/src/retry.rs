//! Per-platform retry policies for upload dispatch.
//!
//! Most platforms get one attempt. Browser-driven platforms whose sessions
//! can wedge (Instagram) get several attempts, with the uploader's recovery
//! hook and a fixed backoff between them.

use crate::models::Platform;

use std::collections::HashMap;
use std::time::Duration;

/// Attempt count used by the standard Instagram policy.
pub const INSTAGRAM_MAX_ATTEMPTS: u32 = 3;

/// How to dispatch one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first, never below 1
    pub max_attempts: u32,
    /// Wait before every attempt after the first
    pub backoff: Duration,
    /// Call the uploader's recovery hook before every attempt after the first
    pub recover_between_attempts: bool,
}

impl RetryPolicy {
    /// One attempt, no retry.
    pub const fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
            recover_between_attempts: false,
        }
    }

    /// `max_attempts` attempts with recovery and `backoff` in between.
    pub fn with_recovery(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
            recover_between_attempts: true,
        }
    }

    /// `max_attempts` clamped to at least one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::single_attempt()
    }
}

/// Policy table: per-platform overrides over a default.
#[derive(Debug, Clone, Default)]
pub struct RetryPolicies {
    default: RetryPolicy,
    overrides: HashMap<Platform, RetryPolicy>,
}

impl RetryPolicies {
    /// `default` for every platform until overridden.
    pub fn new(default: RetryPolicy) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    /// Single attempt everywhere except Instagram, which retries with recovery.
    pub fn standard(backoff: Duration) -> Self {
        Self::new(RetryPolicy::single_attempt())
            .with(Platform::Instagram, RetryPolicy::with_recovery(INSTAGRAM_MAX_ATTEMPTS, backoff))
    }

    /// Sets the policy for one platform.
    pub fn with(mut self, platform: Platform, policy: RetryPolicy) -> Self {
        self.overrides.insert(platform, policy);
        self
    }

    pub fn policy_for(&self, platform: Platform) -> RetryPolicy {
        self.overrides.get(&platform).copied().unwrap_or(self.default)
    }
}
