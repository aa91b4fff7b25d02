//! Completion provider integration
//!
//! Sends assembled chat messages to the completion provider and extracts the
//! generated text.

pub mod mock;
pub mod openrouter;
pub mod types;

pub use mock::MockChatClient;
pub use openrouter::OpenRouterChatClient;
pub use types::{ChatMessage, ChatMessageContent, ContentPart, ImageUrl, Role};

use crate::Result;
use async_trait::async_trait;

/// Per-call values that vary with each inbound request.
#[derive(Debug, Clone)]
pub struct CompletionCall {
    pub api_key: String,
    /// Forwarded to the provider for attribution.
    pub referer: String,
    pub messages: Vec<ChatMessage>,
}

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Returns the first choice's text.
    ///
    /// Fails with [`crate::Error::Upstream`] on a non-success status and with
    /// [`crate::Error::EmptyContent`] when the provider returned nothing usable.
    async fn complete(&self, call: CompletionCall) -> Result<String>;
}
