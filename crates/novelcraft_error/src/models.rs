//! LLM provider errors.

/// Failure conditions reported by an LLM provider client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ModelsErrorKind {
    /// API key environment variable not set
    #[display("API key not configured: {} is not set", _0)]
    MissingApiKey(String),

    /// Provider rejected the credentials
    #[display("Authentication failed: {}", _0)]
    Authentication(String),

    /// Provider throttled the request (HTTP 429)
    #[display("Rate limit exceeded: {}", _0)]
    RateLimit(String),

    /// Request did not complete within the configured timeout
    #[display("Request timed out: {}", _0)]
    Timeout(String),

    /// Non-success status from the provider
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },

    /// Response body could not be decoded
    #[display("Failed to parse response: {}", _0)]
    ResponseParsing(String),

    /// Provider returned no choices
    #[display("Provider returned an empty response")]
    EmptyResponse,

    /// Builder error (derive_builder failures)
    #[display("Builder error: {}", _0)]
    Builder(String),

    /// Tokenizer could not be loaded
    #[display("Token counting failed: {}", _0)]
    TokenCountingFailed(String),
}

impl ModelsErrorKind {
    /// Whether a caller could reasonably retry the same request later.
    ///
    /// The pipeline itself never retries; this is exposed for callers.
    pub fn is_transient(&self) -> bool {
        match self {
            ModelsErrorKind::RateLimit(_) | ModelsErrorKind::Timeout(_) => true,
            ModelsErrorKind::Api { status, .. } => matches!(*status, 500 | 502 | 503 | 504),
            _ => false,
        }
    }
}

/// Model provider error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Models Error: {} at {}:{}", kind, file, line)]
pub struct ModelsError {
    /// The specific error kind
    pub kind: ModelsErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ModelsError {
    /// Create a new models error.
    #[track_caller]
    pub fn new(kind: ModelsErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Result type for model operations.
pub type ModelsResult<T> = Result<T, ModelsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_kinds() {
        assert!(ModelsErrorKind::RateLimit("slow down".to_string()).is_transient());
        assert!(ModelsErrorKind::Timeout("120s".to_string()).is_transient());
        assert!(
            ModelsErrorKind::Api {
                status: 503,
                message: "overloaded".to_string()
            }
            .is_transient()
        );
        assert!(
            !ModelsErrorKind::Api {
                status: 400,
                message: "bad request".to_string()
            }
            .is_transient()
        );
        assert!(!ModelsErrorKind::Authentication("bad key".to_string()).is_transient());
    }

    #[test]
    fn test_display_includes_location() {
        let err = ModelsError::new(ModelsErrorKind::EmptyResponse);
        let rendered = err.to_string();
        assert!(rendered.contains("empty response"));
        assert!(rendered.contains("models.rs"));
    }
}
