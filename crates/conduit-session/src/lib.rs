//! # conduit-session
//!
//! Chat sessions for the investigation front end.
//!
//! Sessions sit behind [`SessionStore`] with three backends: process
//! memory, a single JSON file holding the whole session map, and a local
//! libSQL database. [`ChatService`] runs the message exchange with the
//! case chat endpoint on top of whichever store is configured.

pub mod chat;
pub mod error;
pub mod file;
pub mod ids;
pub mod libsql_store;
pub mod store;

use std::sync::Arc;

use conduit_config::{SessionBackend, SessionConfig};

pub use chat::{CONTEXT_WINDOW, ChatExchange, ChatService};
pub use error::SessionError;
pub use file::{JsonFileSessionStore, STORAGE_KEY};
pub use libsql_store::LibsqlSessionStore;
pub use store::{InMemorySessionStore, SessionStore};

/// Open the store `config` selects.
///
/// # Errors
///
/// Returns `SessionError` if the libSQL database cannot be opened or its
/// path is not valid UTF-8.
pub async fn open_store(config: &SessionConfig) -> Result<Arc<dyn SessionStore>, SessionError> {
    let store: Arc<dyn SessionStore> = match (config.backend, config.resolved_path()) {
        (SessionBackend::File, Some(path)) => Arc::new(JsonFileSessionStore::new(path)),
        (SessionBackend::Libsql, Some(path)) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|source| SessionError::Io {
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }
            }
            let path = path.to_str().ok_or_else(|| {
                SessionError::Migration(format!("non UTF-8 database path: {}", path.display()))
            })?;
            Arc::new(LibsqlSessionStore::open_local(path).await?)
        }
        _ => Arc::new(InMemorySessionStore::new()),
    };
    tracing::debug!(backend = ?config.backend, "session store opened");
    Ok(store)
}
