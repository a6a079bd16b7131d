//! Background eviction of closed rate-limit windows.
//!
//! The sweeper is owned by whoever owns the limiter: it starts when spawned,
//! stops on [`Sweeper::shutdown`], and is cancelled if dropped.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::clock::Clock;
use crate::ratelimit::limiter::RateLimiter;
use crate::ratelimit::store::RateLimitStore;

/// Handle to the periodic sweep task.
#[derive(Debug)]
pub struct Sweeper {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl Sweeper {
    /// Spawns a task on the current tokio runtime that sweeps `limiter`
    /// every `policy.sweep_interval()`, reading the time from `clock`.
    pub fn spawn<S: RateLimitStore>(limiter: Arc<RateLimiter<S>>, clock: Arc<dyn Clock>) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let period = limiter.policy().sweep_interval();

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::debug!(interval_secs = period.as_secs(), "rate limit sweeper started");
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        limiter.sweep(clock.now_ms());
                    }
                }
            }
            tracing::debug!("rate limit sweeper stopped");
        });

        Self {
            cancel,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops the task and waits for it to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!("rate limit sweeper ended abnormally: {e}");
            }
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
