//! The session store interface and its in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use conduit_core::entities::ChatHistory;
use tokio::sync::RwLock;

use crate::error::SessionError;

/// Keyed storage for chat sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<ChatHistory>, SessionError>;

    /// Insert or replace the session with `session.id`.
    async fn put(&self, session: ChatHistory) -> Result<(), SessionError>;

    /// Returns whether a session was removed.
    async fn delete(&self, id: &str) -> Result<bool, SessionError>;

    /// All sessions, most recently updated first.
    async fn list(&self) -> Result<Vec<ChatHistory>, SessionError>;

    /// Sessions about one case, most recently updated first.
    async fn list_by_case(&self, case_id: &str) -> Result<Vec<ChatHistory>, SessionError> {
        let mut sessions = self.list().await?;
        sessions.retain(|s| s.case_id == case_id);
        Ok(sessions)
    }
}

/// Most recently updated first; ties broken by id for a stable order.
pub(crate) fn sort_recent(sessions: &mut [ChatHistory]) {
    sessions.sort_by(|a, b| {
        b.updated_at
            .cmp(&a.updated_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Process-local store. Sessions are lost on restart.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, ChatHistory>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: &str) -> Result<Option<ChatHistory>, SessionError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn put(&self, session: ChatHistory) -> Result<(), SessionError> {
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, SessionError> {
        Ok(self.sessions.write().await.remove(id).is_some())
    }

    async fn list(&self) -> Result<Vec<ChatHistory>, SessionError> {
        let mut sessions: Vec<_> = self.sessions.read().await.values().cloned().collect();
        sort_recent(&mut sessions);
        Ok(sessions)
    }
}
