//! Builds the ordered message list sent to the completion provider.

use crate::ai::{ChatMessage, ChatMessageContent, ContentPart};
use crate::prompts;

/// System instruction, then the optional search context as an assistant
/// turn, then the user turn.
pub fn build_messages(prompt: &str, images: &[String], context: Option<&str>) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(3);
    messages.push(ChatMessage::system(prompts::SYSTEM));

    if let Some(context) = context {
        messages.push(ChatMessage::assistant(context));
    }

    messages.push(ChatMessage::user(user_content(prompt, images)));
    messages
}

/// Plain text without images; otherwise the prompt first, then each image in
/// input order. Providers reject a multipart wrapper around text alone.
pub fn user_content(prompt: &str, images: &[String]) -> ChatMessageContent {
    if images.is_empty() {
        return ChatMessageContent::Text(prompt.to_string());
    }

    let mut parts = Vec::with_capacity(images.len() + 1);
    parts.push(ContentPart::text(prompt));
    parts.extend(images.iter().map(|url| ContentPart::image(url.as_str())));
    ChatMessageContent::Parts(parts)
}
