//! Which request paths the limiter and the admin gate apply to.
//!
//! Paths are compared in canonical form so that spellings a file server
//! resolves to the same location (`//admin`, `/./admin`, `/%61dmin`) are
//! gated like `/admin`.

use percent_encoding::percent_decode_str;

use crate::error::{CoreError, CoreResult};

/// Percent-decodes `path` and drops empty and `.` segments.
///
/// Returns `None` if the decoded path is not UTF-8 or contains a `..`
/// segment.
pub fn canonical_path(path: &str) -> Option<String> {
    let decoded = percent_decode_str(path).decode_utf8().ok()?;
    let mut canonical = String::with_capacity(decoded.len() + 1);
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            segment => {
                canonical.push('/');
                canonical.push_str(segment);
            }
        }
    }
    if canonical.is_empty() {
        canonical.push('/');
    }
    Some(canonical)
}

/// A set of protected path prefixes matched on segment boundaries.
///
/// `/admin` covers `/admin` and `/admin/dashboard` but not `/administrator`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedPaths {
    prefixes: Vec<String>,
}

impl ProtectedPaths {
    pub const DEFAULT_PREFIX: &'static str = "/admin";

    /// Builds the set from prefixes in canonical form, without trailing
    /// slashes.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidPrefix`] if a prefix does not start with `/` or
    /// has no canonical form.
    pub fn new<I, P>(prefixes: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let mut normalized = Vec::new();
        for prefix in prefixes {
            let prefix = prefix.into();
            if !prefix.starts_with('/') {
                return Err(CoreError::InvalidPrefix(prefix));
            }
            let Some(canonical) = canonical_path(&prefix) else {
                return Err(CoreError::InvalidPrefix(prefix));
            };
            normalized.push(canonical.trim_end_matches('/').to_string());
        }
        Ok(Self {
            prefixes: normalized,
        })
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Returns `true` if `path` falls under any prefix.
    ///
    /// A path with no canonical form is protected whenever any prefix is
    /// configured.
    pub fn matches(&self, path: &str) -> bool {
        let Some(path) = canonical_path(path) else {
            return !self.prefixes.is_empty();
        };
        self.prefixes.iter().any(|prefix| {
            // "/" trims to "" and covers every path
            match path.strip_prefix(prefix.as_str()) {
                Some(rest) => prefix.is_empty() || rest.is_empty() || rest.starts_with('/'),
                None => false,
            }
        })
    }
}

impl Default for ProtectedPaths {
    fn default() -> Self {
        Self {
            prefixes: vec![Self::DEFAULT_PREFIX.to_string()],
        }
    }
}
