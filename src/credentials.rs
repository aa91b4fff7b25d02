//! Per-request API key resolution.

use std::fmt;

/// External dependency a credential belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Completion,
    Search,
}

impl Provider {
    /// Request header carrying a caller-supplied key for this provider.
    pub fn override_header(self) -> &'static str {
        match self {
            Provider::Completion => "x-openrouter-key",
            Provider::Search => "x-tavily-key",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Completion => write!(f, "OpenRouter"),
            Provider::Search => write!(f, "Tavily"),
        }
    }
}

/// Keys a caller attached to one request, if any.
#[derive(Debug, Clone, Default)]
pub struct KeyOverrides {
    pub completion: Option<String>,
    pub search: Option<String>,
}

/// Prefer the request-supplied key when it is non-blank, else the fallback.
pub fn resolve(request_key: Option<&str>, fallback: Option<&str>) -> Option<String> {
    non_blank(request_key).or_else(|| non_blank(fallback))
}

fn non_blank(key: Option<&str>) -> Option<String> {
    key.map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
}
