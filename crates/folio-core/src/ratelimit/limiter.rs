//! Fixed-window request limiter.
//!
//! Each client gets a window of `window` length opened by its first request.
//! Up to `max_requests` requests are allowed inside the window; the next one
//! is denied with the number of whole seconds left until the window closes.
//! The first request at or after the reset time opens a fresh window.

use std::time::Duration;

use crate::error::{CoreError, CoreResult};
use crate::ratelimit::store::{MemoryStore, RateLimitEntry, RateLimitStore};

/// Key used when the caller has no client identifier.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Window length, request budget, and sweep cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    window: Duration,
    max_requests: u32,
    sweep_interval: Duration,
}

impl RateLimitPolicy {
    pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);
    pub const DEFAULT_MAX_REQUESTS: u32 = 60;
    pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

    /// Builds a policy.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidPolicy`] if the window is shorter than one
    /// millisecond, the budget is zero, or the sweep interval is zero.
    pub fn new(window: Duration, max_requests: u32, sweep_interval: Duration) -> CoreResult<Self> {
        if window.as_millis() == 0 {
            return Err(CoreError::InvalidPolicy(
                "window must be at least one millisecond".to_string(),
            ));
        }
        if max_requests == 0 {
            return Err(CoreError::InvalidPolicy(
                "max_requests must be positive".to_string(),
            ));
        }
        if sweep_interval.is_zero() {
            return Err(CoreError::InvalidPolicy(
                "sweep_interval must be positive".to_string(),
            ));
        }
        Ok(Self {
            window,
            max_requests,
            sweep_interval,
        })
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    fn window_ms(&self) -> u64 {
        u64::try_from(self.window.as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            window: Self::DEFAULT_WINDOW,
            max_requests: Self::DEFAULT_MAX_REQUESTS,
            sweep_interval: Self::DEFAULT_SWEEP_INTERVAL,
        }
    }
}

/// Outcome of [`RateLimiter::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The request fits in the current window.
    Allowed { remaining: u32 },
    /// The budget is spent; retry after this many seconds.
    Denied { retry_after_secs: u64 },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed { .. })
    }
}

/// Per-client fixed-window limiter over a [`RateLimitStore`].
#[derive(Debug)]
pub struct RateLimiter<S = MemoryStore> {
    policy: RateLimitPolicy,
    store: S,
}

impl RateLimiter<MemoryStore> {
    /// Creates a limiter backed by a fresh [`MemoryStore`].
    pub fn in_memory(policy: RateLimitPolicy) -> Self {
        Self::new(policy, MemoryStore::new())
    }
}

impl<S: RateLimitStore> RateLimiter<S> {
    pub fn new(policy: RateLimitPolicy, store: S) -> Self {
        Self { policy, store }
    }

    pub fn policy(&self) -> &RateLimitPolicy {
        &self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Counts one request from `client_id` at `now_ms` and decides on it.
    ///
    /// An empty `client_id` is counted under [`UNKNOWN_CLIENT`].
    pub fn check(&self, client_id: &str, now_ms: u64) -> Decision {
        let key = if client_id.is_empty() {
            UNKNOWN_CLIENT
        } else {
            client_id
        };
        let window_ms = self.policy.window_ms();

        let entry = self.store.update(key, &mut |current| match current {
            Some(entry) if !entry.is_expired(now_ms) => RateLimitEntry {
                count: entry.count.saturating_add(1),
                ..entry
            },
            _ => RateLimitEntry::first(now_ms, window_ms),
        });

        if entry.count <= self.policy.max_requests {
            tracing::trace!(client = key, count = entry.count, "request within limit");
            Decision::Allowed {
                remaining: self.policy.max_requests - entry.count,
            }
        } else {
            let retry_after_secs = entry.reset_at_ms.saturating_sub(now_ms).div_ceil(1000);
            tracing::warn!(client = key, retry_after_secs, "rate limit exceeded");
            Decision::Denied { retry_after_secs }
        }
    }

    /// Drops every window that has closed by `now_ms`.
    pub fn sweep(&self, now_ms: u64) -> usize {
        let removed = self.store.remove_expired(now_ms);
        if removed > 0 {
            tracing::debug!(
                removed,
                remaining = self.store.len(),
                "swept expired rate limit entries"
            );
        }
        removed
    }

    /// Number of clients with a window in the store.
    pub fn tracked_clients(&self) -> usize {
        self.store.len()
    }
}
