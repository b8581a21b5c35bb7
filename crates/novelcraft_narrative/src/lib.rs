//! Staged story generation for Novelcraft.
//!
//! A story is co-written in turns: a setting card, a prologue, then up to
//! nine chapters that walk a five-stage arc (exposition, development, crisis,
//! climax, resolution). Every chapter is followed by three suggested
//! branches the caller can pick from.
//!
//! # Example
//!
//! ```rust,ignore
//! use novelcraft_models::OpenAIDriver;
//! use novelcraft_narrative::{StoryGenerator, StorySession};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let driver = OpenAIDriver::new("gpt-3.5-turbo")?;
//! let mut session = StorySession::new(StoryGenerator::new(driver)?, 20_000);
//!
//! session.create_setting("A lighthouse keeper finds a door in the sea").await?;
//! session.create_prologue().await?;
//! let chapter = session.next_chapter("The keeper opens the door").await?;
//! println!("{}", chapter.final_summary());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod generator;
mod memory;
mod parser;
mod prompts;
mod session;
mod stage;
mod types;

pub use generator::StoryGenerator;
pub use memory::{ConversationMemory, DEFAULT_TOKEN_BUDGET, LlmSummarizer, Summarizer, Turn};
pub use parser::{
    MAX_RECOMMENDATIONS, parse_recommendations, parse_setting, strip_recommendation_paths,
};
pub use prompts::{
    chapter_messages, chapter_prompt, prologue_messages, recommendation_messages,
    setting_messages, summarizer_messages,
};
pub use session::{SessionState, StorySession};
pub use stage::{CHAPTERS_PER_STAGE, MAX_CHAPTERS, STORY_CHAPTERS, Stage};
pub use types::{ChapterResult, Prologue, Recommendation, StorySetting};
