//! Web search enrichment
//!
//! Queries the search provider with the user's brief and condenses the results
//! into a short background block for the completion model. Enrichment is best
//! effort: [`enrich`] never fails, it only yields a block or nothing.

pub mod client;
pub mod mock;

pub use client::TavilyClient;
pub use mock::MockSearchClient;

use crate::Result;
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;

/// Maximum results requested from, and rendered for, the search provider.
pub const MAX_RESULTS: usize = 10;
pub const SEARCH_DEPTH: &str = "basic";
const SNIPPET_CHARS: usize = 300;

/// Request body for the search endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub search_depth: String,
    pub max_results: usize,
}

impl SearchRequest {
    pub fn basic(query: &str) -> Self {
        Self {
            query: query.to_string(),
            search_depth: SEARCH_DEPTH.to_string(),
            max_results: MAX_RESULTS,
        }
    }
}

/// Search provider response. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<SearchResult>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[async_trait]
pub trait SearchService: Send + Sync {
    async fn search(&self, api_key: &str, request: &SearchRequest) -> Result<SearchResponse>;
}

/// Run one search for `prompt` and render it as a context block.
///
/// Any failure is logged and swallowed.
pub async fn enrich(service: &dyn SearchService, api_key: &str, prompt: &str) -> Option<String> {
    match service.search(api_key, &SearchRequest::basic(prompt)).await {
        Ok(response) => {
            let context = format_context(&response);
            if context.is_none() {
                tracing::debug!("Search returned no answer or results; skipping context");
            }
            context
        }
        Err(e) => {
            tracing::warn!("Web search failed, continuing without context: {}", e);
            None
        }
    }
}

/// Render a search response as numbered lines, or `None` if it has nothing.
pub fn format_context(response: &SearchResponse) -> Option<String> {
    let mut lines = Vec::new();

    if let Some(answer) = response.answer.as_deref().filter(|a| !a.is_empty()) {
        lines.push(format!("Answer summary: {}", answer));
    }

    for (index, result) in response.results.iter().take(MAX_RESULTS).enumerate() {
        let title = result
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("Untitled");
        let url = result.url.as_deref().unwrap_or("");
        let snippet = snippet(result.content.as_deref().unwrap_or(""));
        lines.push(format!("{}. {} — {}", index + 1, title, url));
        lines.push(format!("   Snippet: {}", snippet));
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn snippet(content: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"));

    let head: String = content.chars().take(SNIPPET_CHARS).collect();
    whitespace.replace_all(&head, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result(title: &str, url: &str, content: &str) -> SearchResult {
        SearchResult {
            title: Some(title.to_string()),
            url: Some(url.to_string()),
            content: Some(content.to_string()),
        }
    }

    #[test]
    fn test_format_context_with_answer_and_result() {
        let response = SearchResponse {
            answer: Some("X".to_string()),
            results: vec![result("T", "U", "C")],
        };

        let context = format_context(&response).unwrap();
        let lines: Vec<&str> = context.lines().collect();
        assert_eq!(lines, vec!["Answer summary: X", "1. T — U", "   Snippet: C"]);
    }

    #[test]
    fn test_format_context_without_answer_starts_with_first_result() {
        let response = SearchResponse {
            answer: None,
            results: vec![result("A", "https://a", "alpha"), result("B", "https://b", "beta")],
        };

        let context = format_context(&response).unwrap();
        assert_eq!(
            context,
            "1. A — https://a\n   Snippet: alpha\n2. B — https://b\n   Snippet: beta"
        );
    }

    #[test]
    fn test_format_context_fills_missing_fields() {
        let response = SearchResponse {
            answer: Some(String::new()),
            results: vec![SearchResult::default(), result("", "", "")],
        };

        let context = format_context(&response).unwrap();
        assert_eq!(
            context,
            "1. Untitled — \n   Snippet: \n2. Untitled — \n   Snippet: "
        );
    }

    #[test]
    fn test_format_context_caps_results_in_provider_order() {
        let results = (1..=15)
            .map(|i| result(&format!("title {}", i), "u", "c"))
            .collect();
        let response = SearchResponse {
            answer: None,
            results,
        };

        let context = format_context(&response).unwrap();
        let headers: Vec<&str> = context
            .lines()
            .filter(|line| !line.starts_with("   Snippet"))
            .collect();
        assert_eq!(headers.len(), MAX_RESULTS);
        assert_eq!(headers[0], "1. title 1 — u");
        assert_eq!(headers[9], "10. title 10 — u");
    }

    #[test]
    fn test_null_results_parse_as_empty() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"answer": null, "results": null}"#).unwrap();
        assert!(response.answer.is_none());
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_format_context_empty_response_is_none() {
        assert_eq!(format_context(&SearchResponse::default()), None);
    }

    #[test]
    fn test_snippet_truncates_then_collapses_whitespace() {
        assert_eq!(snippet("a \n\t b   c"), "a b c");
        assert_eq!(snippet("  lead"), " lead");

        let long = "é".repeat(400);
        assert_eq!(snippet(&long).chars().count(), SNIPPET_CHARS);

        let spaced = format!("{}{}", "x".repeat(299), "      tail");
        assert_eq!(snippet(&spaced), format!("{} ", "x".repeat(299)));
    }

    #[tokio::test]
    async fn test_enrich_returns_context_on_success() {
        let service = MockSearchClient::new().with_response(SearchResponse {
            answer: Some("X".to_string()),
            results: vec![],
        });

        let context = enrich(&service, "key", "prompt").await;
        assert_eq!(context.as_deref(), Some("Answer summary: X"));
        assert_eq!(service.queries(), vec!["prompt".to_string()]);
    }

    #[tokio::test]
    async fn test_enrich_swallows_failures() {
        let service = MockSearchClient::new().with_failure(503, "unavailable".to_string());

        assert_eq!(enrich(&service, "key", "prompt").await, None);
        assert_eq!(service.get_call_count(), 1);
    }
}
