//! Client configuration.
//!
//! `ClientConfig` is built once and never mutated afterwards; every dispatch
//! reads it through a shared reference, so concurrent calls need no locking.

use std::time::Duration;

use url::Url;

use crate::error::ApiError;

/// Immutable settings shared by every call of a client.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    base_url: Option<Url>,
    default_headers: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a configuration targeting `base_url`.
    ///
    /// An empty (or blank) string means no base URL: every request path must
    /// then be an absolute URL on its own.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return Ok(Self::default());
        }
        let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }
        Ok(Self {
            base_url: Some(parsed),
            ..Self::default()
        })
    }

    /// Add a header sent with every request unless the caller sets the same
    /// header on the call.
    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Deadline applied to calls that do not set their own.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    pub fn default_headers(&self) -> &[(String, String)] {
        &self.default_headers
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Resolve `path` the way a browser resolves `new URL(path, base)`.
    ///
    /// An origin-relative path (`/api/...`) replaces the whole base path; a
    /// bare relative path (`order`) is joined onto the base's last directory.
    pub fn resolve(&self, path: &str) -> Result<Url, ApiError> {
        let resolved = match &self.base_url {
            Some(base) => base.join(path),
            None => Url::parse(path),
        };
        resolved.map_err(|e| ApiError::InvalidUrl {
            url: path.to_string(),
            reason: e.to_string(),
        })
    }
}
