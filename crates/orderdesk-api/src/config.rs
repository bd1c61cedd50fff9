//! # Client Configuration
//!
//! Base URL normalization and request timeouts for the order API client.

use std::time::Duration;

/// Default timeout for API requests (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// Api Config
// =============================================================================

/// Configuration for [`crate::OrderApi`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Normalized base URL, without a trailing slash or `/api` suffix.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Creates a config from a user-supplied server URL.
    ///
    /// The URL is normalized (see [`normalize_base_url`]) so values like
    /// `localhost:5000/` or `pos.example.com/api/` all work.
    pub fn new(base_url: impl AsRef<str>) -> Self {
        ApiConfig {
            base_url: normalize_base_url(base_url.as_ref()),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// =============================================================================
// URL Normalization
// =============================================================================

/// Normalize the order server URL:
/// - strip trailing slashes
/// - strip a trailing `/api` segment (endpoint paths already carry it)
/// - ensure a scheme is present (https, or http for localhost)
pub fn normalize_base_url(url: &str) -> String {
    let mut url = url.trim().to_string();

    // Ensure scheme
    if !url.starts_with("http://") && !url.starts_with("https://") {
        if url.starts_with("localhost") || url.starts_with("127.0.0.1") {
            url = format!("http://{url}");
        } else {
            url = format!("https://{url}");
        }
    }

    // Strip trailing slashes
    while url.ends_with('/') {
        url.pop();
    }

    // Strip trailing /api
    if url.ends_with("/api") {
        url.truncate(url.len() - 4);
    }

    // Strip trailing slashes again (in case "/api/" was present)
    while url.ends_with('/') {
        url.pop();
    }

    url
}

// =============================================================================
// Unit Tests
// =============================================================================
