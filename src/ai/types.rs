//! Chat message model shared by the payload assembler and chat providers.

use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Assistant,
    User,
}

/// Message content union.
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatMessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// One content segment in multipart message input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn image(url: impl Into<String>) -> Self {
        ContentPart::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }
}

/// Image reference wrapper. `url` is usually a `data:` URI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: ChatMessageContent,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: ChatMessageContent::Text(text.into()),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: ChatMessageContent::Text(text.into()),
        }
    }

    pub fn user(content: ChatMessageContent) -> Self {
        Self {
            role: Role::User,
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_text_content_serializes_as_bare_string() {
        let message = ChatMessage::user(ChatMessageContent::Text("hi".to_string()));
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({ "role": "user", "content": "hi" })
        );
    }

    #[test]
    fn test_parts_serialize_with_type_tags() {
        let message = ChatMessage::user(ChatMessageContent::Parts(vec![
            ContentPart::text("describe"),
            ContentPart::image("data:image/png;base64,AAAA"),
        ]));
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "role": "user",
                "content": [
                    { "type": "text", "text": "describe" },
                    { "type": "image_url", "image_url": { "url": "data:image/png;base64,AAAA" } }
                ]
            })
        );
    }

    #[test]
    fn test_assistant_role_is_lowercase() {
        let value = serde_json::to_value(ChatMessage::assistant("ctx")).unwrap();
        assert_eq!(value["role"], "assistant");
    }
}
