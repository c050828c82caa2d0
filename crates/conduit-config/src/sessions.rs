//! Chat session storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where chat sessions are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// Process memory; lost on restart.
    #[default]
    Memory,
    /// A JSON document holding the whole session map.
    File,
    /// A local libSQL database.
    Libsql,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub backend: SessionBackend,

    /// Storage location for the `file` and `libsql` backends.
    /// Empty means the backend's default under `.conduit/`.
    #[serde(default)]
    pub path: String,
}

impl SessionConfig {
    /// Resolved storage path, or `None` for the memory backend.
    #[must_use]
    pub fn resolved_path(&self) -> Option<PathBuf> {
        let default = match self.backend {
            SessionBackend::Memory => return None,
            SessionBackend::File => ".conduit/ai_fraud_chat_sessions.json",
            SessionBackend::Libsql => ".conduit/sessions.db",
        };
        if self.path.is_empty() {
            Some(PathBuf::from(default))
        } else {
            Some(PathBuf::from(&self.path))
        }
    }
}
