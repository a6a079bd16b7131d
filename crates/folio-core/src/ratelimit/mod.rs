//! Per-client request limiting for protected paths.
//!
//! This module contains the fixed-window [`limiter::RateLimiter`], the
//! [`store::RateLimitStore`] seam with its in-memory [`store::MemoryStore`],
//! the [`scope::ProtectedPaths`] prefix set deciding which requests are
//! counted at all, and the background [`sweeper::Sweeper`] that evicts
//! expired entries.

pub mod limiter;
pub mod scope;
pub mod store;
pub mod sweeper;
