use super::types::{ChatCompletionRequest, ChatCompletionResponse};
use super::APP_TITLE;
use crate::credentials::Provider;
use crate::{Error, Result};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai";

pub struct OpenRouterHttpClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl OpenRouterHttpClient {
    pub fn new_with_client(timeout: Duration, client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub async fn chat_completion(
        &self,
        api_key: &str,
        referer: &str,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        let url = format!("{}/api/v1/chat/completions", self.base_url);
        tracing::debug!(
            "Sending chat completion request to OpenRouter ({} messages)",
            request.messages.len()
        );

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .bearer_auth(api_key)
            .header("HTTP-Referer", referer)
            .header("X-Title", APP_TITLE)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to OpenRouter: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("OpenRouter API error (status {}): {}", status, error_text);
            return Err(Error::Upstream {
                provider: Provider::Completion,
                status: status.as_u16(),
                body: error_text,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse OpenRouter response: {}\nBody: {}", e, body);
            Error::Serialization(e)
        })
    }
}
