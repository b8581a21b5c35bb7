//! Trait definitions for LLM backends and their capabilities.

use async_trait::async_trait;
use novelcraft_core::{GenerateRequest, GenerateResponse, Message, Tokenizer};
use novelcraft_error::NovelcraftResult;
use std::sync::Arc;

/// Core trait that all LLM backends must implement.
///
/// One call sends an ordered list of role-tagged messages plus sampling
/// parameters and returns the generated text. Implementations do not retry.
#[async_trait]
pub trait NovelcraftDriver: Send + Sync {
    /// Generate model output for a chat request.
    async fn generate(&self, req: &GenerateRequest) -> NovelcraftResult<GenerateResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-3.5-turbo").
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T: NovelcraftDriver + ?Sized> NovelcraftDriver for Arc<T> {
    async fn generate(&self, req: &GenerateRequest) -> NovelcraftResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// Anything that can measure text in model tokens.
pub trait TokenCounting: Send + Sync {
    /// Count tokens in text using the model's tokenizer.
    fn count_tokens(&self, text: &str) -> NovelcraftResult<usize>;

    /// Count tokens across a list of messages.
    fn count_message_tokens(&self, messages: &[Message]) -> NovelcraftResult<usize> {
        let mut total = 0;
        for message in messages {
            total += self.count_tokens(message.content())?;
        }
        Ok(total)
    }
}

impl TokenCounting for Tokenizer {
    fn count_tokens(&self, text: &str) -> NovelcraftResult<usize> {
        Ok(self.count(text))
    }
}
