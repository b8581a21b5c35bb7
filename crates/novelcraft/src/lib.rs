//! Novelcraft - co-write a novel with a language model.
//!
//! A story grows in caller-driven turns: a setting card from a free-text
//! idea, a prologue, then chapters that walk a five-stage arc. After each
//! chapter the model proposes three branches for the next one.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use novelcraft::{NovelcraftConfig, StorySession, build_generator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = NovelcraftConfig::load()?;
//!     let mut session = StorySession::new(build_generator(&config)?, *config.memory().token_budget());
//!
//!     session.create_setting("A lighthouse keeper finds a door in the sea").await?;
//!     session.create_prologue().await?;
//!     let chapter = session.next_chapter("The keeper opens the door").await?;
//!     println!("{}", chapter.final_summary());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `novelcraft-error` - Error types
//! - `novelcraft-core` - Messages, requests, responses, tokenizer
//! - `novelcraft-interface` - `NovelcraftDriver` trait definition
//! - `novelcraft-models` - OpenAI-compatible provider
//! - `novelcraft-config` - Layered TOML configuration
//! - `novelcraft-narrative` - Stages, parsers, memory and the story pipeline
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod observability;
mod setup;
mod story;

pub use observability::{ObservabilityConfig, init_observability};
pub use setup::{build_driver, build_generator};
pub use story::{next_prompt, write_story};

pub use novelcraft_config::*;
pub use novelcraft_core::*;
pub use novelcraft_error::*;
pub use novelcraft_interface::*;
pub use novelcraft_models::{OPENAI_API_KEY_ENV, OPENAI_CHAT_URL, OpenAICompatibleClient, OpenAIDriver};
pub use novelcraft_narrative::*;
