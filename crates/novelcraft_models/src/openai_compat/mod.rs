//! Client for any endpoint implementing the OpenAI chat-completions API.

mod client;
mod dto;

pub use client::{OpenAICompatibleClient, classify_status};
pub use dto::{ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatUsage};
