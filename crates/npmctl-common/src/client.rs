use serde::{Deserialize, Serialize};

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Connection settings for an API client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL, e.g. `http://npm.local:81/api`.
    ///
    /// Not validated here; a malformed URL surfaces as a network error on the
    /// first request.
    pub base_url: String,
    /// Timeout bounding each request/response round trip.
    pub timeout_seconds: u64,
}

impl ClientConfig {
    /// Creates a configuration for `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    /// Sets the request timeout.
    ///
    /// # Arguments
    ///
    /// * `timeout_seconds` - Timeout in seconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Joins `endpoint` onto the base URL without doubling the separator.
    #[must_use]
    pub fn endpoint(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}
