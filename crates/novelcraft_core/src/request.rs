//! Request and response types for LLM generation.

use crate::{Message, TokenUsage};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Generic chat generation request.
///
/// # Examples
///
/// ```
/// use novelcraft_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::user("Hello!")])
///     .max_tokens(Some(100))
///     .temperature(Some(1.2))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages().len(), 1);
/// assert_eq!(request.max_tokens(), &Some(100));
/// assert_eq!(request.model(), &None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, Getters, Builder)]
pub struct GenerateRequest {
    /// The conversation messages to send
    messages: Vec<Message>,
    /// Maximum number of tokens to generate
    #[builder(default)]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default)]
    temperature: Option<f32>,
    /// Model identifier override
    #[builder(default)]
    model: Option<String>,
}

impl GenerateRequest {
    /// Create a new builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }

    /// Concatenated text of every message, used for token estimates.
    pub fn text(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content().as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Why generation stopped.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum FinishReason {
    /// Model completed naturally.
    Stop,
    /// Hit max_tokens limit; prose may be truncated.
    Length,
    /// Content was filtered.
    ContentFilter,
    /// Other/unknown reason.
    Other,
}

impl FinishReason {
    /// Map an OpenAI-style `finish_reason` string.
    pub fn from_api_str(reason: &str) -> Self {
        match reason {
            "stop" => FinishReason::Stop,
            "length" => FinishReason::Length,
            "content_filter" => FinishReason::ContentFilter,
            _ => FinishReason::Other,
        }
    }
}

/// The text a model produced for one request.
///
/// # Examples
///
/// ```
/// use novelcraft_core::GenerateResponse;
///
/// let response = GenerateResponse::builder()
///     .text("Once upon a time")
///     .build()
///     .unwrap();
///
/// assert_eq!(response.text(), "Once upon a time");
/// assert!(response.usage().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Builder)]
pub struct GenerateResponse {
    /// Generated text
    #[builder(setter(into))]
    text: String,
    /// Reason the provider stopped generating
    #[builder(default)]
    finish_reason: Option<FinishReason>,
    /// Token usage, when the provider reports it
    #[builder(default)]
    usage: Option<TokenUsage>,
}

impl GenerateResponse {
    /// Create a new builder.
    pub fn builder() -> GenerateResponseBuilder {
        GenerateResponseBuilder::default()
    }

    /// Whether the provider cut the output at the token cap.
    pub fn is_truncated(&self) -> bool {
        self.finish_reason == Some(FinishReason::Length)
    }
}
