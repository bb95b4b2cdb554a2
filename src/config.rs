//! Catalog build configuration.

use std::time::Duration;

/// Default TCP connect timeout (5 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default overall request timeout (30 seconds).
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the manifest lives and how to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Base URL every manifest and schema location is resolved against.
    pub base_url: String,
    /// Manifest location relative to `base_url` (or absolute).
    pub manifest_path: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl CatalogConfig {
    /// Create a config with default timeouts.
    pub fn new(base_url: impl Into<String>, manifest_path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            manifest_path: manifest_path.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the overall request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
