//! Data models and structures
//!
//! Defines the inbound/outbound wire bodies of the generation endpoint, the
//! validated request passed through the pipeline, and process configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Raw JSON body of a generation request.
///
/// Fields are kept untyped so that a wrong type is reported as an invalid
/// request instead of a deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    #[serde(default)]
    pub prompt: Option<Value>,
    /// Legacy single-image field.
    #[serde(default)]
    pub image_data_url: Option<Value>,
    #[serde(default)]
    pub image_data_urls: Option<Value>,
    #[serde(default)]
    pub use_web_search: Option<Value>,
}

/// A validated generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Opaque image references, usually `data:` URIs, in input order.
    pub images: Vec<String>,
    pub use_web_search: bool,
}

impl GenerationRequest {
    /// Parse and validate a raw request body.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| Error::InvalidRequest(format!("body is not valid JSON: {}", e)))?;
        if !value.is_object() {
            return Err(Error::InvalidRequest(
                "body must be a JSON object".to_string(),
            ));
        }
        let body: GenerateBody = serde_json::from_value(value)
            .map_err(|e| Error::InvalidRequest(e.to_string()))?;
        body.validate()
    }
}

impl GenerateBody {
    pub fn validate(self) -> Result<GenerationRequest> {
        let prompt = match self.prompt {
            Some(Value::String(prompt)) if !prompt.trim().is_empty() => prompt,
            Some(Value::String(_)) => {
                return Err(Error::InvalidRequest("prompt is empty".to_string()))
            }
            Some(_) => {
                return Err(Error::InvalidRequest(
                    "prompt must be a string".to_string(),
                ))
            }
            None => return Err(Error::InvalidRequest("prompt is required".to_string())),
        };

        // The list form wins whenever it is an array; non-string entries are dropped.
        let images = match (self.image_data_urls, self.image_data_url) {
            (Some(Value::Array(urls)), _) => urls
                .into_iter()
                .filter_map(|url| match url {
                    Value::String(url) => Some(url),
                    _ => None,
                })
                .collect(),
            (_, Some(Value::String(url))) if !url.is_empty() => vec![url],
            _ => Vec::new(),
        };

        Ok(GenerationRequest {
            prompt,
            images,
            use_web_search: matches!(self.use_web_search, Some(Value::Bool(true))),
        })
    }
}

/// Success body: `{ "prompt": <text> }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateResponse {
    pub prompt: String,
}

/// Failure body: `{ "error": <category>, "detail"?: <diagnostic> }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        Self {
            error: err.category(),
            detail: err.detail(),
        }
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Fallback completion key when a request carries none.
    pub openrouter_api_key: Option<String>,
    /// Fallback search key when a request carries none.
    pub tavily_api_key: Option<String>,
    pub openrouter_base_url: String,
    pub tavily_base_url: String,
    pub default_referer: String,
    pub completion_timeout: Duration,
    pub search_timeout: Duration,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openrouter_api_key: None,
            tavily_api_key: None,
            openrouter_base_url: crate::ai::openrouter::client::DEFAULT_BASE_URL.to_string(),
            tavily_base_url: crate::search::client::DEFAULT_BASE_URL.to_string(),
            default_referer: "http://localhost:3000".to_string(),
            completion_timeout: Duration::from_secs(120),
            search_timeout: Duration::from_secs(15),
            max_body_bytes: 20 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let secret = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let parse_number = |name: &str| -> Result<Option<u64>> {
            lookup(name)
                .map(|raw| {
                    raw.trim().parse::<u64>().map_err(|_| {
                        Error::Config(format!("{} must be a non-negative integer, got '{}'", name, raw))
                    })
                })
                .transpose()
        };

        Ok(Self {
            openrouter_api_key: secret("OPENROUTER_API_KEY"),
            tavily_api_key: secret("TAVILY_API_KEY"),
            openrouter_base_url: lookup("OPENROUTER_BASE_URL")
                .unwrap_or(defaults.openrouter_base_url),
            tavily_base_url: lookup("TAVILY_BASE_URL").unwrap_or(defaults.tavily_base_url),
            default_referer: lookup("DEFAULT_REFERER").unwrap_or(defaults.default_referer),
            completion_timeout: parse_number("COMPLETION_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.completion_timeout),
            search_timeout: parse_number("SEARCH_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.search_timeout),
            max_body_bytes: parse_number("MAX_BODY_BYTES")?
                .map(|bytes| bytes as usize)
                .unwrap_or(defaults.max_body_bytes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn parse(body: &str) -> Result<GenerationRequest> {
        GenerationRequest::from_json(body.as_bytes())
    }

    #[test]
    fn test_minimal_request() {
        let request = parse(r#"{"prompt": "Write a tagline"}"#).unwrap();
        assert_eq!(
            request,
            GenerationRequest {
                prompt: "Write a tagline".to_string(),
                images: vec![],
                use_web_search: false,
            }
        );
    }

    #[test]
    fn test_invalid_prompts_are_rejected() {
        for body in [
            r#"{}"#,
            r#"{"prompt": null}"#,
            r#"{"prompt": ""}"#,
            r#"{"prompt": "   "}"#,
            r#"{"prompt": 42}"#,
            r#"{"prompt": ["a"]}"#,
            r#"not json"#,
            r#"["prompt"]"#,
        ] {
            let err = parse(body).unwrap_err();
            assert!(matches!(err, Error::InvalidRequest(_)), "body: {}", body);
        }
    }

    #[test]
    fn test_image_list_drops_non_strings_and_keeps_order() {
        let request =
            parse(r#"{"prompt": "p", "imageDataUrls": ["data:b", 7, null, "data:a"]}"#).unwrap();
        assert_eq!(request.images, vec!["data:b".to_string(), "data:a".to_string()]);
    }

    #[test]
    fn test_legacy_single_image_is_used_without_list() {
        let request = parse(r#"{"prompt": "p", "imageDataUrl": "data:x"}"#).unwrap();
        assert_eq!(request.images, vec!["data:x".to_string()]);

        let request =
            parse(r#"{"prompt": "p", "imageDataUrl": "data:x", "imageDataUrls": null}"#).unwrap();
        assert_eq!(request.images, vec!["data:x".to_string()]);
    }

    #[test]
    fn test_image_list_wins_over_legacy_field() {
        let request =
            parse(r#"{"prompt": "p", "imageDataUrl": "data:x", "imageDataUrls": []}"#).unwrap();
        assert!(request.images.is_empty());
    }

    #[test]
    fn test_web_search_only_on_literal_true() {
        assert!(parse(r#"{"prompt": "p", "useWebSearch": true}"#).unwrap().use_web_search);
        assert!(!parse(r#"{"prompt": "p", "useWebSearch": false}"#).unwrap().use_web_search);
        assert!(!parse(r#"{"prompt": "p", "useWebSearch": "yes"}"#).unwrap().use_web_search);
    }

    #[test]
    fn test_error_response_omits_missing_detail() {
        let body = ErrorResponse::from(&Error::EmptyContent);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "error": "No content returned" })
        );
    }

    #[test]
    fn test_config_from_lookup_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.openrouter_api_key, None);
        assert_eq!(config.openrouter_base_url, "https://openrouter.ai");
        assert_eq!(config.tavily_base_url, "https://api.tavily.com");
        assert_eq!(config.default_referer, "http://localhost:3000");
        assert_eq!(config.completion_timeout, Duration::from_secs(120));
        assert_eq!(config.search_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_config_from_lookup_reads_values_and_ignores_blank_keys() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("OPENROUTER_API_KEY", "sk-or"),
            ("TAVILY_API_KEY", "  "),
            ("SEARCH_TIMEOUT_SECS", "3"),
            ("MAX_BODY_BYTES", "1024"),
        ]);
        let config = Config::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();

        assert_eq!(config.openrouter_api_key.as_deref(), Some("sk-or"));
        assert_eq!(config.tavily_api_key, None);
        assert_eq!(config.search_timeout, Duration::from_secs(3));
        assert_eq!(config.max_body_bytes, 1024);
    }

    #[test]
    fn test_config_rejects_bad_numbers() {
        let err = Config::from_lookup(|name| {
            (name == "COMPLETION_TIMEOUT_SECS").then(|| "soon".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
