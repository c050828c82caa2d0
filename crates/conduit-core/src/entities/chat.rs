use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ChatRole;
use crate::nullable::vec_or_empty;

/// A single message in a case chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// A chat session about one fraud case. Keys are camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatHistory {
    pub id: String,
    pub case_id: String,
    pub case_name: String,
    pub title: String,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<ChatMessage>>")]
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A message in the `{role, text}` form the chat backend expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConversationTurn {
    pub role: ChatRole,
    pub text: String,
}

impl From<&ChatMessage> for ConversationTurn {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role,
            text: message.content.clone(),
        }
    }
}

/// Request body for the case chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChatRequest {
    pub messages: Vec<ConversationTurn>,
    pub session_id: String,
    pub case_id: String,
}

/// Reply from the case chat endpoint, after envelope unwrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChatReply {
    pub response: String,
    #[serde(default, deserialize_with = "vec_or_empty")]
    #[schemars(with = "Option<Vec<String>>")]
    pub source_references: Vec<String>,
    #[serde(default)]
    pub visualization: bool,
}
