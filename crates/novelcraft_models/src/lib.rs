//! LLM provider integrations for Novelcraft.
//!
//! Every provider speaks the OpenAI chat-completions wire format through
//! [`OpenAICompatibleClient`]; [`OpenAIDriver`] is the default provider used
//! by the story pipeline.
//!
//! ```no_run
//! use novelcraft_core::{GenerateRequest, Message};
//! use novelcraft_interface::NovelcraftDriver;
//! use novelcraft_models::OpenAIDriver;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let driver = OpenAIDriver::new("gpt-3.5-turbo")?;
//! let request = GenerateRequest::builder()
//!     .messages(vec![Message::user("Hello")])
//!     .build()?;
//! let response = driver.generate(&request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai;
mod openai_compat;

pub use openai::{OPENAI_API_KEY_ENV, OPENAI_CHAT_URL, OpenAIDriver};
pub use openai_compat::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatUsage,
    OpenAICompatibleClient, classify_status,
};
