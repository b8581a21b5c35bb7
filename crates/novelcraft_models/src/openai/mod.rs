//! OpenAI chat-completions driver.

mod driver;

pub use driver::{OPENAI_API_KEY_ENV, OPENAI_CHAT_URL, OpenAIDriver};
