//! Token accounting and the tokenizer shared by memory and providers.

use std::sync::Arc;

use derive_getters::Getters;
use novelcraft_error::{ModelsError, ModelsErrorKind, ModelsResult};
use serde::{Deserialize, Serialize};
use tiktoken_rs::CoreBPE;

/// Token usage statistics reported for one LLM call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Getters)]
pub struct TokenUsage {
    /// Tokens in the prompt.
    prompt_tokens: usize,
    /// Tokens in the completion.
    completion_tokens: usize,
    /// Sum of both.
    total_tokens: usize,
}

impl TokenUsage {
    /// Create a usage record; the total is derived.
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }

    /// Add another call's usage to this one.
    pub fn accumulate(&mut self, other: &TokenUsage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.total_tokens += other.total_tokens;
    }
}

/// Byte-pair tokenizer used to measure text against token budgets.
///
/// Cloning is cheap; the encoder tables are shared.
#[derive(Clone)]
pub struct Tokenizer {
    bpe: Arc<CoreBPE>,
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer").finish_non_exhaustive()
    }
}

impl Tokenizer {
    /// The `cl100k_base` encoding used by the GPT-3.5/GPT-4 family.
    ///
    /// # Errors
    ///
    /// Returns `TokenCountingFailed` if the encoder tables cannot be loaded.
    pub fn cl100k() -> ModelsResult<Self> {
        tiktoken_rs::cl100k_base()
            .map(|bpe| Self { bpe: Arc::new(bpe) })
            .map_err(|e| {
                ModelsError::new(ModelsErrorKind::TokenCountingFailed(format!(
                    "Failed to load cl100k_base: {}",
                    e
                )))
            })
    }

    /// Encoder for a named model, falling back to `cl100k_base` for unknown models.
    pub fn for_model(model: &str) -> ModelsResult<Self> {
        match tiktoken_rs::get_bpe_from_model(model) {
            Ok(bpe) => Ok(Self { bpe: Arc::new(bpe) }),
            Err(_) => Self::cl100k(),
        }
    }

    /// Number of tokens in `text`.
    pub fn count(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }
}
