//! Upstream API base URLs, one per front end.

use serde::{Deserialize, Serialize};

/// Fallback base URL of the HR backend.
pub const HRIS_FALLBACK_URL: &str = "https://ai-hris-server.azurewebsites.net";
/// Fallback base URL of the fraud-investigation backend.
pub const INVESTIGATION_FALLBACK_URL: &str = "https://ai-investigation-server.azurewebsites.net";
/// Fallback base URL of the tax backend.
pub const TAX_FALLBACK_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Scheme, host and optional port, without a trailing path
    /// (e.g. `https://ai-hris-server.azurewebsites.net`).
    #[serde(default)]
    pub base_url: String,
}

impl UpstreamConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn hris() -> Self {
        Self::new(HRIS_FALLBACK_URL)
    }

    #[must_use]
    pub fn investigation() -> Self {
        Self::new(INVESTIGATION_FALLBACK_URL)
    }

    #[must_use]
    pub fn tax() -> Self {
        Self::new(TAX_FALLBACK_URL)
    }

    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty()
    }

    /// Base URL without trailing slashes, ready for path concatenation.
    #[must_use]
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
