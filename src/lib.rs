//! Master-prompt generation service
//!
//! Accepts a user brief (text plus optional images), optionally enriches it
//! with web search context, and asks a chat-completion provider to turn it
//! into a single structured prompt.

pub mod ai;
pub mod app;
pub mod credentials;
pub mod error;
pub mod models;
pub mod payload;
pub mod prompts;
pub mod search;
pub mod server;

pub use error::{Error, Result};
