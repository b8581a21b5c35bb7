//! Descriptive types for LLM backends.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Static capabilities of a model, used to sanity-check token budgets.
///
/// # Examples
///
/// ```
/// use novelcraft_interface::ModelMetadata;
///
/// let meta = ModelMetadata::builder()
///     .provider("openai")
///     .model("gpt-3.5-turbo")
///     .max_input_tokens(16_385_usize)
///     .max_output_tokens(4_096_usize)
///     .build()
///     .unwrap();
///
/// assert!(meta.fits(16_000));
/// assert!(!meta.fits(20_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into))]
pub struct ModelMetadata {
    /// Provider name
    provider: String,
    /// Model identifier
    model: String,
    /// Maximum input context tokens
    max_input_tokens: usize,
    /// Maximum output tokens per request
    max_output_tokens: usize,
}

impl ModelMetadata {
    /// Create a new builder.
    pub fn builder() -> ModelMetadataBuilder {
        ModelMetadataBuilder::default()
    }

    /// Whether a prompt of `prompt_tokens` fits the context window.
    pub fn fits(&self, prompt_tokens: usize) -> bool {
        prompt_tokens <= self.max_input_tokens
    }
}
