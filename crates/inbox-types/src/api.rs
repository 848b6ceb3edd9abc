//! Wire payloads of the customer REST endpoints.
//!
//! Absent or null fields fall back to defaults here, so nothing past this
//! module has to deal with half-populated JSON.

use serde::{Deserialize, Serialize};

use crate::conversation::{AssistantProfile, Conversation};
use crate::message::Role;

pub const USER_DATA_PATH: &str = "/customer/userdata";
pub const MESSAGES_PATH: &str = "/customer/messages";
pub const CREATE_CONVERSATION_PATH: &str = "/customer/createConv";
pub const SEND_MESSAGE_PATH: &str = "/customer/sendMessage";

/// The backend returns the assistant either populated or as a bare id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssistantField {
    Id(String),
    Profile(AssistantProfile),
}

impl From<AssistantField> for AssistantProfile {
    fn from(field: AssistantField) -> Self {
        match field {
            AssistantField::Id(id) => AssistantProfile::from_id(id),
            AssistantField::Profile(profile) => profile,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserDataResponse {
    #[serde(default)]
    pub assistant: Option<AssistantField>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub messages: Vec<Conversation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessagesResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub messages: Vec<Conversation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateConversationRequest {
    #[serde(rename = "assistantId")]
    pub assistant_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateConversationResponse {
    pub conversation: Conversation,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    /// Identifier of the conversation the message goes to
    #[serde(rename = "messageId")]
    pub conversation_id: String,
    pub role: Role,
    pub content: String,
}

/// Profile-plus-conversations snapshot used by `initialize`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserData {
    pub assistant: Option<AssistantProfile>,
    pub conversations: Vec<Conversation>,
}

impl From<UserDataResponse> for UserData {
    fn from(resp: UserDataResponse) -> Self {
        Self {
            assistant: resp.assistant.map(AssistantProfile::from),
            conversations: resp.messages,
        }
    }
}

/// Reads a missing or null list as empty.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Documents carry `_id`, `id`, or both; `_id` wins.
pub(crate) fn pick_id(document_id: Option<String>, id: Option<String>) -> Result<String, String> {
    document_id
        .or(id)
        .ok_or_else(|| "missing field `_id`".to_string())
}
