//! Wire types for the chat-completions endpoint.

use derive_getters::Getters;
use novelcraft_core::Message;
use serde::{Deserialize, Serialize};

/// One `{role, content}` entry of the `messages` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatMessage {
    role: String,
    content: String,
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role().as_api_str().to_string(),
            content: message.content().clone(),
        }
    }
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Serialize, Getters)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl ChatCompletionRequest {
    /// Assemble a request body.
    pub fn new(
        model: impl Into<String>,
        messages: Vec<ChatMessage>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature,
            max_tokens,
        }
    }
}

/// Successful response body. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize, Getters)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

/// One completion candidate.
#[derive(Debug, Clone, Deserialize, Getters)]
pub struct ChatChoice {
    message: ChatMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Token accounting block.
#[derive(Debug, Clone, Copy, Deserialize, Getters)]
pub struct ChatUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
}
