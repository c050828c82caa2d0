//! JSON file store.
//!
//! The whole session map lives in one JSON document, an object keyed by
//! session id. Every write replaces the file through a temporary sibling
//! and a rename, so readers never see a half-written map.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use conduit_core::entities::ChatHistory;
use tokio::sync::Mutex;

use crate::error::SessionError;
use crate::store::{SessionStore, sort_recent};

/// Well-known name of the persisted session map.
pub const STORAGE_KEY: &str = "ai_fraud_chat_sessions";

type SessionMap = BTreeMap<String, ChatHistory>;

#[derive(Debug)]
pub struct JsonFileSessionStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonFileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// `{dir}/ai_fraud_chat_sessions.json`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(format!("{STORAGE_KEY}.json")))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// A missing file is an empty map. An unreadable map is logged and
    /// treated as empty; the next write replaces it.
    async fn load(&self) -> Result<SessionMap, SessionError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(SessionMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        match serde_json::from_slice(&bytes) {
            Ok(map) => Ok(map),
            Err(error) => {
                tracing::warn!(path = %self.path.display(), %error, "discarding unreadable session file");
                Ok(SessionMap::new())
            }
        }
    }

    async fn save(&self, map: &SessionMap) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.io_error(e))?;
            }
        }
        let json = serde_json::to_vec_pretty(map)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))
    }
}

#[async_trait]
impl SessionStore for JsonFileSessionStore {
    async fn get(&self, id: &str) -> Result<Option<ChatHistory>, SessionError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(id))
    }

    async fn put(&self, session: ChatHistory) -> Result<(), SessionError> {
        let _guard = self.lock.lock().await;
        let mut map = self.load().await?;
        map.insert(session.id.clone(), session);
        self.save(&map).await
    }

    async fn delete(&self, id: &str) -> Result<bool, SessionError> {
        let _guard = self.lock.lock().await;
        let mut map = self.load().await?;
        let removed = map.remove(id).is_some();
        if removed {
            self.save(&map).await?;
        }
        Ok(removed)
    }

    async fn list(&self) -> Result<Vec<ChatHistory>, SessionError> {
        let _guard = self.lock.lock().await;
        let mut sessions: Vec<_> = self.load().await?.into_values().collect();
        sort_recent(&mut sessions);
        Ok(sessions)
    }
}
