//! Error types for `folio-core`.
//!
//! The limiter and the comparator are total; errors only arise while
//! building a policy or decoding credentials supplied by a client.

/// Unified error type for core operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A rate-limit policy parameter is out of range.
    #[error("invalid rate limit policy: {0}")]
    InvalidPolicy(String),

    /// A protected path prefix is malformed.
    #[error("invalid protected prefix: {0}")]
    InvalidPrefix(String),
}

/// Reasons an `Authorization` header fails to yield credentials.
///
/// Every variant is treated as an authentication failure by callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsError {
    #[error("authorization scheme is not Basic")]
    MissingScheme,

    #[error("credentials are not valid base64")]
    InvalidEncoding,

    #[error("credentials are not valid UTF-8")]
    InvalidUtf8,

    #[error("credentials lack a ':' separator")]
    MissingSeparator,
}

/// Convenience alias used throughout `folio-core`.
pub type CoreResult<T> = Result<T, CoreError>;
