//! REST adapter for the customer endpoints.
//!
//! Uses browser `fetch()` via gloo-net. Every request carries the bearer
//! token handed in by the engine; 401/403 become `InboxError::AuthExpired`.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use inbox_core::ports::InboxApiPort;
use inbox_types::{
    InboxError, Result,
    api::{
        CreateConversationRequest, CreateConversationResponse, MessagesResponse,
        SendMessageRequest, UserData, UserDataResponse, CREATE_CONVERSATION_PATH,
        MESSAGES_PATH, SEND_MESSAGE_PATH, USER_DATA_PATH,
    },
    config::ApiConfig,
    conversation::Conversation,
};

pub struct RestInboxApi {
    config: ApiConfig,
}

impl RestInboxApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {}", token)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<T> {
        let url = self.config.endpoint(path);
        let response = Request::get(&url)
            .header("Authorization", &Self::bearer(token))
            .send()
            .await
            .map_err(|e| InboxError::Network(e.to_string()))?;

        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| InboxError::Serialization(e.to_string()))
    }

    async fn post_json<B: serde::Serialize>(&self, path: &str, token: &str, body: &B) -> Result<Response> {
        let url = self.config.endpoint(path);
        let response = Request::post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", &Self::bearer(token))
            .json(body)
            .map_err(|e| InboxError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| InboxError::Network(e.to_string()))?;

        check_status(response).await
    }
}

/// Turn a non-2xx response into an error, keeping the body for the log.
async fn check_status(response: Response) -> Result<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    log::debug!("{} answered {}: {}", response.url(), status, text);
    Err(InboxError::from_status(status, text))
}

#[async_trait(?Send)]
impl InboxApiPort for RestInboxApi {
    async fn fetch_user_data(&self, token: &str) -> Result<UserData> {
        let data: UserDataResponse = self.get_json(USER_DATA_PATH, token).await?;
        Ok(UserData::from(data))
    }

    async fn fetch_messages(&self, token: &str) -> Result<Vec<Conversation>> {
        let data: MessagesResponse = self.get_json(MESSAGES_PATH, token).await?;
        Ok(data.messages)
    }

    async fn create_conversation(&self, token: &str, assistant_id: &str) -> Result<Conversation> {
        let body = CreateConversationRequest {
            assistant_id: assistant_id.to_string(),
        };
        let response = self.post_json(CREATE_CONVERSATION_PATH, token, &body).await?;
        let data: CreateConversationResponse = response
            .json()
            .await
            .map_err(|e| InboxError::Serialization(e.to_string()))?;
        Ok(data.conversation)
    }

    async fn send_message(&self, token: &str, req: &SendMessageRequest) -> Result<()> {
        // The response body is not needed; the next poll brings the canonical copy.
        self.post_json(SEND_MESSAGE_PATH, token, req).await?;
        Ok(())
    }
}
