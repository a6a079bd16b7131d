//! HTTP Basic `Authorization` header decoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};

use crate::error::CredentialsError;

/// A username/password pair taken from a request.
#[derive(Debug)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Parses `Basic <base64(username:password)>`.
    ///
    /// The scheme is matched case-insensitively and the decoded text is
    /// split on its first `:`, so passwords may themselves contain colons.
    ///
    /// # Errors
    ///
    /// - [`CredentialsError::MissingScheme`] if the value is not `Basic <token>`.
    /// - [`CredentialsError::InvalidEncoding`] if the token is not standard base64.
    /// - [`CredentialsError::InvalidUtf8`] if the decoded bytes are not UTF-8.
    /// - [`CredentialsError::MissingSeparator`] if there is no `:`.
    pub fn from_authorization(value: &str) -> Result<Self, CredentialsError> {
        let (scheme, token) = value
            .trim()
            .split_once(' ')
            .ok_or(CredentialsError::MissingScheme)?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return Err(CredentialsError::MissingScheme);
        }

        let decoded = STANDARD
            .decode(token.trim())
            .map_err(|_| CredentialsError::InvalidEncoding)?;
        let decoded = String::from_utf8(decoded).map_err(|_| CredentialsError::InvalidUtf8)?;
        let (username, password) = decoded
            .split_once(':')
            .ok_or(CredentialsError::MissingSeparator)?;

        Ok(Self::new(username, password))
    }

    /// Renders the pair as an `Authorization` header value.
    pub fn to_authorization(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password.expose_secret());
        format!("Basic {}", STANDARD.encode(raw))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}
