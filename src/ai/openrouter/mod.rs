pub mod chat;
pub mod client;
pub mod types;

pub use chat::OpenRouterChatClient;

/// Model identifier sent with every completion request.
pub const MODEL: &str = "openai/gpt-5-chat";
pub const TEMPERATURE: f64 = 0.7;
/// Value of the `X-Title` attribution header.
pub const APP_TITLE: &str = "Prompt Generator";
