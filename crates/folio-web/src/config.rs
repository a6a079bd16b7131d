use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use folio_core::{AdminCredentials, ProtectedPaths, RateLimitPolicy, DEFAULT_ADMIN_USERNAME};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub tls: TlsConfig,
}

#[derive(Clone, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,
    /// Leaving this unset turns the admin gate off.
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_protected_prefixes")]
    pub protected_prefixes: Vec<String>,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("protected_prefixes", &self.protected_prefixes)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
    /// Key clients by the first `X-Forwarded-For` hop instead of the peer
    /// address. Only safe behind a proxy that overwrites the header.
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_root")]
    pub root: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TlsConfig {
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

impl TlsConfig {
    pub fn is_enabled(&self) -> bool {
        self.cert_path.is_some() && self.key_path.is_some()
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password: None,
            protected_prefixes: default_protected_prefixes(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_secs: default_window_secs(),
            max_requests: default_max_requests(),
            sweep_interval_secs: default_sweep_interval_secs(),
            trust_forwarded_for: false,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: default_site_root(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            admin: AdminConfig::default(),
            rate_limit: RateLimitConfig::default(),
            site: SiteConfig::default(),
            tls: TlsConfig::default(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 4321))
}

fn default_admin_username() -> String {
    DEFAULT_ADMIN_USERNAME.to_string()
}

fn default_protected_prefixes() -> Vec<String> {
    vec![ProtectedPaths::DEFAULT_PREFIX.to_string()]
}

fn default_true() -> bool {
    true
}

fn default_window_secs() -> u64 {
    RateLimitPolicy::DEFAULT_WINDOW.as_secs()
}

fn default_max_requests() -> u32 {
    RateLimitPolicy::DEFAULT_MAX_REQUESTS
}

fn default_sweep_interval_secs() -> u64 {
    RateLimitPolicy::DEFAULT_SWEEP_INTERVAL.as_secs()
}

fn default_site_root() -> PathBuf {
    PathBuf::from("dist")
}

impl AdminConfig {
    pub fn credentials(&self) -> AdminCredentials {
        AdminCredentials::new(Some(self.username.clone()), self.password.clone())
    }

    pub fn protected_paths(&self) -> anyhow::Result<ProtectedPaths> {
        Ok(ProtectedPaths::new(self.protected_prefixes.iter().cloned())?)
    }
}

impl RateLimitConfig {
    pub fn policy(&self) -> anyhow::Result<RateLimitPolicy> {
        Ok(RateLimitPolicy::new(
            Duration::from_secs(self.window_secs),
            self.max_requests,
            Duration::from_secs(self.sweep_interval_secs),
        )?)
    }
}

impl ServerConfig {
    /// Returns `true` if an admin password is configured.
    pub fn has_auth(&self) -> bool {
        self.admin.password.as_ref().is_some_and(|p| !p.is_empty())
    }

    pub fn load() -> anyhow::Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Loads from `FOLIO_CONFIG` (if set) and applies environment overrides
    /// read through `env`.
    pub fn load_with(env: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = match env("FOLIO_CONFIG") {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(username) = env("ADMIN_USERNAME") {
            config.admin.username = username;
        }
        if let Some(password) = env("ADMIN_PASSWORD") {
            config.admin.password = Some(password);
        }
        if config.admin.password.as_deref() == Some("") {
            config.admin.password = None;
        }

        if let Some(addr) = env("FOLIO_BIND_ADDR") {
            config.bind_addr = addr
                .parse()
                .with_context(|| format!("invalid FOLIO_BIND_ADDR: {addr}"))?;
        }
        if let Some(root) = env("FOLIO_SITE_ROOT") {
            config.site.root = PathBuf::from(root);
        }
        if let Some(cert) = env("FOLIO_TLS_CERT") {
            config.tls.cert_path = Some(cert);
        }
        if let Some(key) = env("FOLIO_TLS_KEY") {
            config.tls.key_path = Some(key);
        }

        config.validate()?;

        if !config.has_auth() {
            tracing::warn!(
                "ADMIN_PASSWORD is not set. The admin area is NOT protected by authentication."
            );
            // Security: restrict binding when no auth is configured
            if config.bind_addr.ip().is_unspecified() {
                if env("FOLIO_INSECURE").is_some() {
                    tracing::warn!(
                        "Serving an unauthenticated admin area on all interfaces ({}).",
                        config.bind_addr
                    );
                } else {
                    let safe_addr: SocketAddr = ([127, 0, 0, 1], config.bind_addr.port()).into();
                    tracing::warn!(
                        "No admin password configured. Binding to {} instead of {} for safety. \
                         Set FOLIO_INSECURE=1 to override (NOT RECOMMENDED).",
                        safe_addr,
                        config.bind_addr
                    );
                    config.bind_addr = safe_addr;
                }
            }
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Checks the values serde cannot: policy ranges and prefix syntax.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.rate_limit.policy()?;
        self.admin.protected_paths()?;
        if self.tls.cert_path.is_some() != self.tls.key_path.is_some() {
            anyhow::bail!("TLS needs both cert_path and key_path");
        }
        Ok(())
    }
}
