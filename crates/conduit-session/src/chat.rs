//! Case chat: session lifecycle and the message exchange with the
//! investigation backend.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use conduit_core::entities::{ChatHistory, ChatMessage, ChatReply, ChatRequest, ConversationTurn};
use conduit_core::enums::ChatRole;
use conduit_proxy::catalog::investigation;
use conduit_proxy::{Forwarder, ProxyRequest};
use serde::Serialize;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::SessionError;
use crate::ids;
use crate::store::SessionStore;

/// Prior messages sent along with a new one.
pub const CONTEXT_WINDOW: usize = 10;

/// The assistant's answer to one user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatExchange {
    pub assistant_message: String,
    pub source_references: Vec<String>,
    /// The session after both messages were appended.
    pub session: ChatHistory,
}

/// One lock per session id, held across each read-modify-write of that
/// session.
type SessionLocks = Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>;

#[derive(Clone)]
pub struct ChatService {
    store: Arc<dyn SessionStore>,
    forwarder: Forwarder,
    locks: SessionLocks,
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("forwarder", &self.forwarder)
            .finish_non_exhaustive()
    }
}

impl ChatService {
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>, forwarder: Forwarder) -> Self {
        Self {
            store,
            forwarder,
            locks: SessionLocks::default(),
        }
    }

    async fn lock_session(&self, session_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(session_id.to_string()).or_default())
        };
        lock.lock_owned().await
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Create and store an empty session titled `Chat: {case_name}`.
    ///
    /// A fresh id is generated unless `session_id` is given.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if id generation or storage fails.
    pub async fn create_session(
        &self,
        case_id: &str,
        case_name: &str,
        session_id: Option<String>,
    ) -> Result<ChatHistory, SessionError> {
        let now = Utc::now();
        let id = match session_id {
            Some(id) => id,
            None => ids::session_id(now)?,
        };
        let session = ChatHistory {
            id,
            case_id: case_id.to_string(),
            case_name: case_name.to_string(),
            title: format!("Chat: {case_name}"),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.store.put(session.clone()).await?;
        tracing::debug!(session_id = %session.id, case_id, "chat session created");
        Ok(session)
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotFound` for an unknown id.
    pub async fn session(&self, session_id: &str) -> Result<ChatHistory, SessionError> {
        self.store
            .get(session_id)
            .await?
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))
    }

    /// Append a message locally without contacting the backend.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFound` for an unknown id.
    pub async fn add_message(
        &self,
        session_id: &str,
        message: ChatMessage,
    ) -> Result<ChatHistory, SessionError> {
        let _guard = self.lock_session(session_id).await;
        let mut session = self.session(session_id).await?;
        session.updated_at = Utc::now();
        session.messages.push(message);
        self.store.put(session.clone()).await?;
        Ok(session)
    }

    /// Send `text` to the case chat and record both sides of the exchange.
    ///
    /// The last [`CONTEXT_WINDOW`] messages plus the new one go upstream as
    /// `{role, text}` turns. The session is only updated when the backend
    /// answers; a failed call leaves it untouched. Exchanges on one session
    /// run one at a time, so each sees the previous one in its window.
    ///
    /// # Errors
    ///
    /// - `SessionError::NotFound` for an unknown session.
    /// - `SessionError::Proxy` when the backend call fails.
    pub async fn send_message(
        &self,
        session_id: &str,
        text: &str,
    ) -> Result<ChatExchange, SessionError> {
        let _guard = self.lock_session(session_id).await;
        let mut session = self.session(session_id).await?;

        let start = session.messages.len().saturating_sub(CONTEXT_WINDOW);
        let mut turns: Vec<ConversationTurn> = session.messages[start..]
            .iter()
            .map(ConversationTurn::from)
            .collect();
        turns.push(ConversationTurn {
            role: ChatRole::User,
            text: text.to_string(),
        });
        let request = ChatRequest {
            messages: turns,
            session_id: session.id.clone(),
            case_id: session.case_id.clone(),
        };
        let body = serde_json::to_value(&request)?;

        let reply: ChatReply = self
            .forwarder
            .forward_json(
                &investigation::CASE_CHAT,
                ProxyRequest::post()
                    .param("id", session.case_id.as_str())
                    .json(body),
            )
            .await?;

        let now = Utc::now();
        session.messages.push(ChatMessage {
            id: ids::message_id(now, 0),
            role: ChatRole::User,
            content: text.to_string(),
            timestamp: now,
        });
        session.messages.push(ChatMessage {
            id: ids::message_id(now, 1),
            role: ChatRole::Assistant,
            content: reply.response.clone(),
            timestamp: now,
        });
        session.updated_at = now;
        self.store.put(session.clone()).await?;

        Ok(ChatExchange {
            assistant_message: reply.response,
            source_references: reply.source_references,
            session,
        })
    }
}
