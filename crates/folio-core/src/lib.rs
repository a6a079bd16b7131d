//! folio core library — request gating for the admin server.
//!
//! `folio-core` holds the pieces of the admin request path that carry real
//! correctness properties, kept free of any HTTP framework so the web crate
//! (`folio-web`) only has to translate outcomes into responses.
//!
//! # Modules
//!
//! - [`ratelimit`] — Per-client fixed-window limiter, its storage seam, and the background sweeper.
//! - [`auth`] — Constant-time comparison, HTTP Basic credential parsing, and admin credential checks.
//! - [`clock`] — Millisecond clocks (system and manually driven).
//! - [`error`] — Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod auth;
pub mod clock;
pub mod error;
pub mod ratelimit;

pub use auth::admin::{AdminCredentials, DEFAULT_ADMIN_USERNAME};
pub use auth::basic::Credentials;
pub use auth::compare::safe_compare;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, CoreResult, CredentialsError};
pub use ratelimit::limiter::{Decision, RateLimitPolicy, RateLimiter, UNKNOWN_CLIENT};
pub use ratelimit::scope::{canonical_path, ProtectedPaths};
pub use ratelimit::store::{MemoryStore, RateLimitEntry, RateLimitStore};
pub use ratelimit::sweeper::Sweeper;
