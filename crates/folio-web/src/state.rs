use std::sync::Arc;

use folio_core::{AdminCredentials, Clock, ProtectedPaths, RateLimiter};

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub limiter: Arc<RateLimiter>,
    pub admin: Arc<AdminCredentials>,
    /// Paths both the rate limiter and the admin gate apply to.
    pub protected: Arc<ProtectedPaths>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(config: ServerConfig, clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        let limiter = RateLimiter::in_memory(config.rate_limit.policy()?);
        let protected = config.admin.protected_paths()?;
        let admin = config.admin.credentials();

        Ok(Self {
            config: Arc::new(config),
            limiter: Arc::new(limiter),
            admin: Arc::new(admin),
            protected: Arc::new(protected),
            clock,
        })
    }
}
