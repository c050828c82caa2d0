//! Durable session store on a local libSQL database.
//!
//! Each session is one row; the full `ChatHistory` is kept as JSON in
//! `body`, with `case_id` and `updated_at` lifted out for filtering and
//! ordering.

use async_trait::async_trait;
use chrono::SecondsFormat;
use conduit_core::entities::ChatHistory;
use libsql::Builder;

use crate::error::SessionError;
use crate::store::{SessionStore, sort_recent};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS chat_sessions (
    id TEXT PRIMARY KEY,
    case_id TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    body TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_chat_sessions_case ON chat_sessions(case_id);
";

pub struct LibsqlSessionStore {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl std::fmt::Debug for LibsqlSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibsqlSessionStore").finish_non_exhaustive()
    }
}

impl LibsqlSessionStore {
    /// Open (or create) the database at `path`. `":memory:"` is accepted.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the database cannot be opened or the
    /// schema cannot be created.
    pub async fn open_local(path: &str) -> Result<Self, SessionError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        conn.execute_batch(SCHEMA)
            .await
            .map_err(|e| SessionError::Migration(format!("chat_sessions: {e}")))?;
        Ok(Self { db, conn })
    }

    async fn query_bodies(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Vec<ChatHistory>, SessionError> {
        let mut rows = self.conn.query(sql, params).await?;
        let mut sessions = Vec::new();
        while let Some(row) = rows.next().await? {
            let body: String = row.get(0)?;
            sessions.push(serde_json::from_str(&body)?);
        }
        Ok(sessions)
    }
}

#[async_trait]
impl SessionStore for LibsqlSessionStore {
    async fn get(&self, id: &str) -> Result<Option<ChatHistory>, SessionError> {
        let mut sessions = self
            .query_bodies("SELECT body FROM chat_sessions WHERE id = ?1", [id])
            .await?;
        Ok(sessions.pop())
    }

    async fn put(&self, session: ChatHistory) -> Result<(), SessionError> {
        let body = serde_json::to_string(&session)?;
        let updated_at = session
            .updated_at
            .to_rfc3339_opts(SecondsFormat::Millis, true);
        self.conn
            .execute(
                "INSERT INTO chat_sessions (id, case_id, updated_at, body) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET
                     case_id = excluded.case_id,
                     updated_at = excluded.updated_at,
                     body = excluded.body",
                libsql::params![
                    session.id.as_str(),
                    session.case_id.as_str(),
                    updated_at,
                    body
                ],
            )
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, SessionError> {
        let affected = self
            .conn
            .execute("DELETE FROM chat_sessions WHERE id = ?1", [id])
            .await?;
        Ok(affected > 0)
    }

    async fn list(&self) -> Result<Vec<ChatHistory>, SessionError> {
        let mut sessions = self
            .query_bodies("SELECT body FROM chat_sessions ORDER BY updated_at DESC", ())
            .await?;
        sort_recent(&mut sessions);
        Ok(sessions)
    }

    async fn list_by_case(&self, case_id: &str) -> Result<Vec<ChatHistory>, SessionError> {
        let mut sessions = self
            .query_bodies(
                "SELECT body FROM chat_sessions WHERE case_id = ?1 ORDER BY updated_at DESC",
                [case_id],
            )
            .await?;
        sort_recent(&mut sessions);
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_local_creates_table() {
        let store = LibsqlSessionStore::open_local(":memory:").await.unwrap();
        let mut rows = store
            .conn
            .query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                ["chat_sessions"],
            )
            .await
            .unwrap();
        assert!(rows.next().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn reopening_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.db");
        let path = path.to_str().unwrap();
        let now = chrono::Utc::now();
        let session = ChatHistory {
            id: "session-1".into(),
            case_id: "case-1".into(),
            case_name: "Kickbacks".into(),
            title: "Chat: Kickbacks".into(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        {
            let store = LibsqlSessionStore::open_local(path).await.unwrap();
            store.put(session.clone()).await.unwrap();
        }
        let store = LibsqlSessionStore::open_local(path).await.unwrap();
        let loaded = store.get("session-1").await.unwrap().unwrap();
        assert_eq!(loaded.case_name, session.case_name);
    }
}
