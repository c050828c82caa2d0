//! Session error types.

use std::path::PathBuf;

use conduit_proxy::ProxyError;
use thiserror::Error;

/// Errors from session storage and the chat workflow.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No session with this id.
    #[error("Session not found: {0}")]
    NotFound(String),

    /// Reading or writing the session file failed.
    #[error("Session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored session could not be encoded or decoded.
    #[error("Session serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Schema setup failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// The chat backend call failed.
    #[error(transparent)]
    Proxy(#[from] ProxyError),

    /// The OS random source was unavailable.
    #[error("Random source unavailable: {0}")]
    Random(String),
}
