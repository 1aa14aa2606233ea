//! Types for the Sonora backend API that do not belong to the core model.

use crate::error::{Result, ServerClientError};
use serde::{Deserialize, Serialize};
use url::Url;

/// Default request timeout; radio generation can take a long time
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for connecting to a Sonora backend.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// API root (e.g., "https://radio.example.com/api")
    pub url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Create a new server config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Validate the URL and strip trailing slashes.
    pub(crate) fn normalized_url(&self) -> Result<String> {
        if self.url.trim().is_empty() {
            return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = self.url.trim().trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServerClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        Url::parse(&url).map_err(|e| ServerClientError::InvalidUrl(e.to_string()))?;
        Ok(url)
    }
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for the login endpoint.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// =============================================================================
// Library Scan Types
// =============================================================================

/// Request body for starting a scan.
#[derive(Debug, Serialize)]
pub struct StartScanRequest {
    pub full: bool,
}

/// Response from starting a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StartScan {
    /// False when a scan was already running
    pub started: bool,
}

/// Progress of the library scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ScanStatus {
    /// Recordings fetched so far
    pub fetched: u64,
    pub scanning: bool,
}

// =============================================================================
// Error Types
// =============================================================================

/// Uniform error body returned by the backend.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub error: String,
}
