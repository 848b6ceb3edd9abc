use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::pick_id;

/// Prefix of every client-assigned identifier
pub const TEMP_ID_PREFIX: &str = "temp-";

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// Local delivery marker for the optimistic send.
/// Never serialized: everything coming from the server is `Confirmed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Delivery {
    #[default]
    Confirmed,
    /// Appended locally, request still in flight
    Pending,
    /// Server accepted the send, waiting for a poll to return the canonical copy
    Sent,
}

/// A single message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireMessage")]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: String,
    pub role: Role,
    pub content: String,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub delivery: Delivery,
}

/// Message as the backend sends it. Documents may carry both `_id` and
/// `id`, or both `timestamp` and `createdAt`, and any of them may be null.
#[derive(Deserialize)]
struct WireMessage {
    #[serde(rename = "_id", default)]
    document_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    role: Role,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "createdAt", default)]
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<WireMessage> for Message {
    type Error = String;

    fn try_from(wire: WireMessage) -> Result<Self, Self::Error> {
        Ok(Self {
            id: pick_id(wire.document_id, wire.id)?,
            role: wire.role,
            content: wire.content.unwrap_or_default(),
            created_at: wire.timestamp.or(wire.created_at).unwrap_or_else(Utc::now),
            delivery: Delivery::Confirmed,
        })
    }
}

impl Message {
    /// An optimistic user message with a fresh temporary id.
    pub fn pending_user(content: impl Into<String>) -> Self {
        Self {
            id: temp_id(),
            role: Role::User,
            content: content.into(),
            created_at: Utc::now(),
            delivery: Delivery::Pending,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.delivery == Delivery::Confirmed
    }

    pub fn has_temp_id(&self) -> bool {
        is_temp_id(&self.id)
    }
}

pub fn temp_id() -> String {
    format!("{}{}", TEMP_ID_PREFIX, uuid::Uuid::new_v4())
}

pub fn is_temp_id(id: &str) -> bool {
    id.starts_with(TEMP_ID_PREFIX)
}
