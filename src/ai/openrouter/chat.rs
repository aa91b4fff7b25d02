use super::client::OpenRouterHttpClient;
use super::types::ChatCompletionRequest;
use super::{MODEL, TEMPERATURE};
use crate::ai::{ChatService, CompletionCall};
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

pub struct OpenRouterChatClient {
    http: OpenRouterHttpClient,
}

impl OpenRouterChatClient {
    pub fn new(timeout: Duration) -> Self {
        Self::new_with_client(timeout, reqwest::Client::new())
    }

    pub fn new_with_client(timeout: Duration, client: reqwest::Client) -> Self {
        Self {
            http: OpenRouterHttpClient::new_with_client(timeout, client),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl ChatService for OpenRouterChatClient {
    async fn complete(&self, call: CompletionCall) -> Result<String> {
        let request = ChatCompletionRequest {
            model: MODEL.to_string(),
            messages: call.messages,
            temperature: TEMPERATURE,
        };

        let response = self
            .http
            .chat_completion(&call.api_key, &call.referer, &request)
            .await?;

        match response.first_text() {
            Some(text) => Ok(text.to_string()),
            None => {
                tracing::warn!(
                    "OpenRouter returned no usable content (finish_reason: {:?})",
                    response.choices.first().and_then(|c| c.finish_reason.as_deref())
                );
                Err(Error::EmptyContent)
            }
        }
    }
}
