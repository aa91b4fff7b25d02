//! OpenRouter chat-completion request/response envelopes.

use crate::ai::ChatMessage;
use serde::{Deserialize, Serialize};

/// Request body for chat completions.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
}

/// Top-level chat completion response.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// Single choice item returned by chat completions.
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
    pub finish_reason: Option<String>,
}

/// Assistant message inside a choice.
///
/// `content` is kept loosely typed: providers may send `null`, a string, or
/// structured parts, and only a non-empty string is usable here.
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<serde_json::Value>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if it is a non-empty string.
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_ref())
            .and_then(serde_json::Value::as_str)
            .filter(|text| !text.is_empty())
    }
}
