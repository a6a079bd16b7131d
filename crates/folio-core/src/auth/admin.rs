//! The configured admin login.

use secrecy::{ExposeSecret, SecretString};

use crate::auth::basic::Credentials;
use crate::auth::compare::safe_compare;

/// Username used when none is configured.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Admin username and optional password.
///
/// Without a password the gate is off and every request passes; this keeps
/// deployments that have not set one yet working.
#[derive(Debug)]
pub struct AdminCredentials {
    username: String,
    password: Option<SecretString>,
}

impl AdminCredentials {
    /// Empty values count as unset.
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        let username = username
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.to_string());
        let password = password.filter(|p| !p.is_empty()).map(SecretString::from);
        Self { username, password }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns `true` if a password is configured.
    pub fn is_enabled(&self) -> bool {
        self.password.is_some()
    }

    /// Checks both fields with [`safe_compare`].
    ///
    /// Both comparisons always run. Returns `false` when no password is
    /// configured, since there is nothing to match.
    pub fn verify(&self, credentials: &Credentials) -> bool {
        let Some(expected) = &self.password else {
            return false;
        };
        let username_ok = safe_compare(credentials.username(), &self.username);
        let password_ok = safe_compare(credentials.password(), expected.expose_secret());
        username_ok & password_ok
    }

    /// Decides on a raw `Authorization` header value.
    ///
    /// Passes everything when the gate is off. Otherwise a missing or
    /// undecodable header is a failure, never an error.
    pub fn authorize(&self, authorization: Option<&str>) -> bool {
        if !self.is_enabled() {
            return true;
        }
        let Some(value) = authorization else {
            tracing::debug!("admin request without credentials");
            return false;
        };
        match Credentials::from_authorization(value) {
            Ok(credentials) => {
                let ok = self.verify(&credentials);
                if !ok {
                    tracing::warn!("Failed admin login attempt");
                }
                ok
            }
            Err(e) => {
                tracing::warn!("Malformed admin credentials: {e}");
                false
            }
        }
    }
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self::new(None, None)
    }
}
