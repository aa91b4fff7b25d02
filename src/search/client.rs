use super::{SearchRequest, SearchResponse, SearchService};
use crate::credentials::Provider;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

/// Tavily search API client.
pub struct TavilyClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl TavilyClient {
    pub fn new(timeout: Duration) -> Self {
        Self::new_with_client(timeout, Client::new())
    }

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
}

#[async_trait]
impl SearchService for TavilyClient {
    async fn search(&self, api_key: &str, request: &SearchRequest) -> Result<SearchResponse> {
        let url = format!("{}/search", self.base_url);
        tracing::debug!(
            "Searching Tavily (depth: {}, max_results: {})",
            request.search_depth,
            request.max_results
        );

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(Error::Upstream {
                provider: Provider::Search,
                status: status.as_u16(),
                body: error_text,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
