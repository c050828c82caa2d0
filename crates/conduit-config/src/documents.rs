//! Document proxy configuration.

use serde::{Deserialize, Serialize};

/// Storage container the PDF proxy may fetch from.
pub const DEFAULT_ALLOWED_PREFIX: &str = "https://protohub.blob.core.windows.net/";

fn default_allowed_prefix() -> String {
    DEFAULT_ALLOWED_PREFIX.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocumentsConfig {
    /// Only URLs starting with this prefix are proxied.
    #[serde(default = "default_allowed_prefix")]
    pub allowed_prefix: String,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            allowed_prefix: default_allowed_prefix(),
        }
    }
}

impl DocumentsConfig {
    /// Whether `url` falls under the allowed prefix. An empty prefix allows nothing.
    #[must_use]
    pub fn allows(&self, url: &str) -> bool {
        !self.allowed_prefix.is_empty() && url.starts_with(&self.allowed_prefix)
    }
}
