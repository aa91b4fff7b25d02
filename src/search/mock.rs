use super::{SearchRequest, SearchResponse, SearchService};
use crate::credentials::Provider;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory [`SearchService`] returning one canned outcome.
#[derive(Clone)]
pub struct MockSearchClient {
    response: Arc<Mutex<Option<SearchResponse>>>,
    failure: Arc<Mutex<Option<(u16, String)>>>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockSearchClient {
    pub fn new() -> Self {
        Self {
            response: Arc::new(Mutex::new(None)),
            failure: Arc::new(Mutex::new(None)),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, response: SearchResponse) -> Self {
        *self.response.lock().unwrap() = Some(response);
        self
    }

    /// Make every search fail as if the provider returned `status`.
    pub fn with_failure(self, status: u16, body: String) -> Self {
        *self.failure.lock().unwrap() = Some((status, body));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl Default for MockSearchClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchService for MockSearchClient {
    async fn search(&self, _api_key: &str, request: &SearchRequest) -> Result<SearchResponse> {
        self.queries.lock().unwrap().push(request.query.clone());

        if let Some((status, body)) = self.failure.lock().unwrap().clone() {
            return Err(Error::Upstream {
                provider: Provider::Search,
                status,
                body,
            });
        }

        Ok(self.response.lock().unwrap().clone().unwrap_or_default())
    }
}
