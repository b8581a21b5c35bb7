//! Core data types for the Novelcraft story generation library.
//!
//! These types describe a chat-style exchange with a language model and are
//! shared by the driver trait, the provider clients and the story pipeline.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod message;
mod request;
mod role;
mod token_counting;

pub use message::{Message, MessageBuilder, MessageBuilderError};
pub use request::{
    FinishReason, GenerateRequest, GenerateRequestBuilder, GenerateRequestBuilderError,
    GenerateResponse, GenerateResponseBuilder, GenerateResponseBuilderError,
};
pub use role::Role;
pub use token_counting::{Tokenizer, TokenUsage};
