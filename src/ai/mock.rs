use super::{ChatService, CompletionCall};
use crate::credentials::Provider;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Upstream { status: u16, body: String },
    Empty,
}

/// In-memory [`ChatService`] that replays canned replies and records calls.
#[derive(Clone)]
pub struct MockChatClient {
    replies: Arc<Mutex<Vec<MockReply>>>,
    calls: Arc<Mutex<Vec<CompletionCall>>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_prompt_response(self, response: String) -> Self {
        self.replies.lock().unwrap().push(MockReply::Text(response));
        self
    }

    pub fn with_upstream_error(self, status: u16, body: String) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Upstream { status, body });
        self
    }

    pub fn with_empty_content(self) -> Self {
        self.replies.lock().unwrap().push(MockReply::Empty);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Every call received so far, oldest first.
    pub fn calls(&self) -> Vec<CompletionCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatService for MockChatClient {
    async fn complete(&self, call: CompletionCall) -> Result<String> {
        let count = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(call);
            calls.len()
        };

        let replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Ok("<role> mock prompt".to_string());
        }

        match &replies[(count - 1) % replies.len()] {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Upstream { status, body } => Err(Error::Upstream {
                provider: Provider::Completion,
                status: *status,
                body: body.clone(),
            }),
            MockReply::Empty => Err(Error::EmptyContent),
        }
    }
}
