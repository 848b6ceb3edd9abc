use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{null_as_empty, pick_id};
use crate::message::{Message, TEMP_ID_PREFIX};

pub const DEFAULT_ASSISTANT_NAME: &str = "Your assistant";

/// The staff member assigned to the customer. Referenced, not owned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireAssistant")]
pub struct AssistantProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub avatar: Option<String>,
    pub online: bool,
}

#[derive(Deserialize)]
struct WireAssistant {
    #[serde(rename = "_id", default)]
    document_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    avatar: Option<String>,
    #[serde(default)]
    online: Option<bool>,
}

impl TryFrom<WireAssistant> for AssistantProfile {
    type Error = String;

    fn try_from(wire: WireAssistant) -> Result<Self, Self::Error> {
        Ok(Self {
            id: pick_id(wire.document_id, wire.id)?,
            name: wire.name.unwrap_or_else(default_assistant_name),
            avatar: wire.avatar,
            online: wire.online.unwrap_or(false),
        })
    }
}

fn default_assistant_name() -> String {
    DEFAULT_ASSISTANT_NAME.to_string()
}

impl AssistantProfile {
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: default_assistant_name(),
            avatar: None,
            online: false,
        }
    }

    /// Initials for the avatar fallback
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Display metadata copied from the assistant profile on every refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantDisplay {
    pub name: String,
    pub avatar: Option<String>,
    pub online: bool,
}

impl From<&AssistantProfile> for AssistantDisplay {
    fn from(profile: &AssistantProfile) -> Self {
        Self {
            name: profile.name.clone(),
            avatar: profile.avatar.clone(),
            online: profile.online,
        }
    }
}

/// A conversation thread between the customer and the assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireConversation")]
pub struct Conversation {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "assistantId")]
    pub assistant_id: Option<String>,
    #[serde(rename = "conversation")]
    pub messages: Vec<Message>,
    #[serde(rename = "updatedAt")]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub display: Option<AssistantDisplay>,
    /// True only for the client-side conversation created before the first send
    #[serde(skip)]
    pub placeholder: bool,
}

#[derive(Deserialize)]
struct WireConversation {
    #[serde(rename = "_id", default)]
    document_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "assistantId", default)]
    assistant_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    conversation: Vec<Message>,
    #[serde(rename = "updatedAt", default)]
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<WireConversation> for Conversation {
    type Error = String;

    fn try_from(wire: WireConversation) -> Result<Self, Self::Error> {
        Ok(Self {
            id: pick_id(wire.document_id, wire.id)?,
            assistant_id: wire.assistant_id,
            messages: wire.conversation,
            last_activity: wire.updated_at,
            display: None,
            placeholder: false,
        })
    }
}

impl Conversation {
    /// Local stand-in used when an assistant is assigned but nothing was sent yet.
    pub fn placeholder(assistant: &AssistantProfile) -> Self {
        Self {
            id: format!("{}conv-{}", TEMP_ID_PREFIX, uuid::Uuid::new_v4()),
            assistant_id: Some(assistant.id.clone()),
            messages: Vec::new(),
            last_activity: None,
            display: Some(AssistantDisplay::from(assistant)),
            placeholder: true,
        }
    }

    pub fn decorate(&mut self, assistant: &AssistantProfile) {
        self.display = Some(AssistantDisplay::from(assistant));
    }

    pub fn has_unconfirmed(&self) -> bool {
        self.messages.iter().any(|m| !m.is_confirmed())
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Latest activity, falling back to the newest message
    pub fn activity_at(&self) -> Option<DateTime<Utc>> {
        self.last_activity
            .or_else(|| self.messages.last().map(|m| m.created_at))
    }
}
