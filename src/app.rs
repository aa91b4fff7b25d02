//! Request orchestration for prompt generation.

use crate::ai::{ChatService, CompletionCall, OpenRouterChatClient};
use crate::credentials::{self, KeyOverrides, Provider};
use crate::models::{Config, GenerationRequest};
use crate::search::{self, SearchService, TavilyClient};
use crate::{payload, Error, Result};
use tracing::{debug, info};

/// Sequences credential resolution, optional enrichment, payload assembly and
/// dispatch for one generation request.
pub struct App {
    chat: Box<dyn ChatService>,
    search: Box<dyn SearchService>,
    completion_key: Option<String>,
    search_key: Option<String>,
    default_referer: String,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub chat: Box<dyn ChatService>,
    pub search: Box<dyn SearchService>,
}

impl App {
    /// Build an app from concrete service dependencies.
    ///
    /// Fallback keys and the default referer still come from `config`.
    pub fn with_services(services: AppServices, config: &Config) -> Self {
        Self {
            chat: services.chat,
            search: services.search,
            completion_key: config.openrouter_api_key.clone(),
            search_key: config.tavily_api_key.clone(),
            default_referer: config.default_referer.clone(),
        }
    }

    /// Construct an app talking to the real providers.
    pub fn new(config: &Config) -> Self {
        // Reuse one HTTP connection pool across provider clients.
        let http_client = reqwest::Client::new();

        let chat = OpenRouterChatClient::new_with_client(
            config.completion_timeout,
            http_client.clone(),
        )
        .with_base_url(config.openrouter_base_url.clone());
        let search = TavilyClient::new_with_client(config.search_timeout, http_client)
            .with_base_url(config.tavily_base_url.clone());

        info!(
            "Completion provider: {} (fallback key {})",
            config.openrouter_base_url,
            if config.openrouter_api_key.is_some() { "configured" } else { "not set" }
        );
        info!(
            "Search provider: {} (fallback key {})",
            config.tavily_base_url,
            if config.tavily_api_key.is_some() { "configured" } else { "not set" }
        );

        Self::with_services(
            AppServices {
                chat: Box::new(chat),
                search: Box::new(search),
            },
            config,
        )
    }

    /// Generate a master prompt for `request`.
    ///
    /// `origin` is the caller's origin, forwarded to the completion provider;
    /// the configured default is used when it is absent.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        keys: &KeyOverrides,
        origin: Option<&str>,
    ) -> Result<String> {
        let completion_key =
            credentials::resolve(keys.completion.as_deref(), self.completion_key.as_deref())
                .ok_or(Error::MissingCredential(Provider::Completion))?;

        let context = if request.use_web_search {
            let search_key =
                credentials::resolve(keys.search.as_deref(), self.search_key.as_deref())
                    .ok_or(Error::MissingCredential(Provider::Search))?;
            search::enrich(self.search.as_ref(), &search_key, &request.prompt).await
        } else {
            None
        };

        debug!(
            "Assembling payload ({} images, search context: {})",
            request.images.len(),
            context.is_some()
        );
        let messages = payload::build_messages(&request.prompt, &request.images, context.as_deref());

        let referer = origin
            .filter(|origin| !origin.is_empty())
            .unwrap_or(self.default_referer.as_str())
            .to_string();

        let prompt = self
            .chat
            .complete(CompletionCall {
                api_key: completion_key,
                referer,
                messages,
            })
            .await?;

        info!("Generated prompt ({} chars)", prompt.chars().count());
        Ok(prompt)
    }
}
