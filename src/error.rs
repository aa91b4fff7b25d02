//! Error handling and custom error types
//!
//! Provides unified error handling across the service using thiserror. Every
//! error classifies into one [`ErrorKind`], which decides the HTTP status class
//! and the client-facing category string.

use crate::credentials::Provider;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0} API key is missing")]
    MissingCredential(Provider),

    #[error("{provider} API error (status {status}): {body}")]
    Upstream {
        provider: Provider,
        status: u16,
        body: String,
    },

    #[error("No content returned by completion provider")]
    EmptyContent,

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure taxonomy exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidRequest,
    MissingCredential,
    Upstream,
    EmptyContent,
    Unexpected,
}

impl ErrorKind {
    /// HTTP status class for this kind. Only malformed input is a client error.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::InvalidRequest => 400,
            _ => 500,
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Error::MissingCredential(_) => ErrorKind::MissingCredential,
            Error::Upstream { .. } => ErrorKind::Upstream,
            Error::EmptyContent => ErrorKind::EmptyContent,
            Error::Http(_)
            | Error::Serialization(_)
            | Error::Io(_)
            | Error::Config(_)
            | Error::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// Human-readable category for the `error` field of the failure body.
    pub fn category(&self) -> String {
        match self {
            Error::InvalidRequest(_) => "Invalid request".to_string(),
            Error::MissingCredential(provider) => {
                format!("{} API key is missing. Provide it from settings.", provider)
            }
            Error::Upstream { provider, .. } => format!("{} error", provider),
            Error::EmptyContent => "No content returned".to_string(),
            _ => "Unexpected error".to_string(),
        }
    }

    /// Diagnostic detail for the `detail` field, if this kind carries one.
    pub fn detail(&self) -> Option<String> {
        match self {
            Error::InvalidRequest(reason) => Some(reason.clone()),
            Error::Upstream { body, .. } => Some(body.clone()),
            Error::MissingCredential(_) | Error::EmptyContent => None,
            Error::Unexpected(detail) => Some(detail.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_invalid_request_is_a_client_error() {
        assert_eq!(ErrorKind::InvalidRequest.status_code(), 400);
        for kind in [
            ErrorKind::MissingCredential,
            ErrorKind::Upstream,
            ErrorKind::EmptyContent,
            ErrorKind::Unexpected,
        ] {
            assert_eq!(kind.status_code(), 500);
        }
    }

    #[test]
    fn test_missing_credential_category_names_provider() {
        let err = Error::MissingCredential(Provider::Completion);
        assert_eq!(
            err.category(),
            "OpenRouter API key is missing. Provide it from settings."
        );
        assert_eq!(err.detail(), None);

        let err = Error::MissingCredential(Provider::Search);
        assert_eq!(
            err.category(),
            "Tavily API key is missing. Provide it from settings."
        );
    }

    #[test]
    fn test_upstream_detail_is_raw_body() {
        let err = Error::Upstream {
            provider: Provider::Completion,
            status: 429,
            body: "{\"error\":\"rate limited\"}".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert_eq!(err.category(), "OpenRouter error");
        assert_eq!(err.detail().as_deref(), Some("{\"error\":\"rate limited\"}"));
    }

    #[test]
    fn test_transport_errors_classify_as_unexpected() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert_eq!(err.category(), "Unexpected error");
        assert!(err.detail().unwrap().starts_with("Serialization error"));
    }
}
