//! Top-level error wrapper types.

use crate::{ConfigError, HttpError, IoError, JsonError, ModelsError, NarrativeError};

/// Every error condition a Novelcraft operation can surface.
///
/// # Examples
///
/// ```
/// use novelcraft_error::{NovelcraftError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: NovelcraftError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum NovelcraftErrorKind {
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// File or output stream error
    #[from(IoError)]
    Io(IoError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// LLM provider error
    #[from(ModelsError)]
    Models(ModelsError),
    /// Story generation error
    #[from(NarrativeError)]
    Narrative(NarrativeError),
}

/// Novelcraft error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Novelcraft Error: {}", _0)]
pub struct NovelcraftError(Box<NovelcraftErrorKind>);

impl NovelcraftError {
    /// Create a new error from a kind.
    pub fn new(kind: NovelcraftErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &NovelcraftErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to NovelcraftErrorKind
impl<T> From<T> for NovelcraftError
where
    T: Into<NovelcraftErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Novelcraft operations.
pub type NovelcraftResult<T> = std::result::Result<T, NovelcraftError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ModelsErrorKind, NarrativeErrorKind};

    fn family(err: &NovelcraftError) -> &'static str {
        match err.kind() {
            NovelcraftErrorKind::Http(_) => "http",
            NovelcraftErrorKind::Io(_) => "io",
            NovelcraftErrorKind::Json(_) => "json",
            NovelcraftErrorKind::Config(_) => "config",
            NovelcraftErrorKind::Models(_) => "models",
            NovelcraftErrorKind::Narrative(_) => "narrative",
        }
    }

    #[test]
    fn test_each_family_converts_into_wrapper() {
        let errors: Vec<NovelcraftError> = vec![
            HttpError::new("refused").into(),
            IoError::new("broken pipe").into(),
            JsonError::new("bad body").into(),
            ConfigError::new("missing file").into(),
            ModelsError::new(ModelsErrorKind::Builder("no messages".into())).into(),
            NarrativeError::new(NarrativeErrorKind::RequestBuild("no messages".into())).into(),
        ];
        let families: Vec<&str> = errors.iter().map(family).collect();
        assert_eq!(families, ["http", "io", "json", "config", "models", "narrative"]);
        assert!(errors[5].to_string().contains("Failed to build request"));
    }
}
