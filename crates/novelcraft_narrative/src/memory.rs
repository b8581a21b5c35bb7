//! Session-scoped conversation memory with summarizing compaction.

use crate::prompts;
use async_trait::async_trait;
use derive_getters::Getters;
use novelcraft_config::GenerationParams;
use novelcraft_core::{GenerateRequest, Message};
use novelcraft_error::{NarrativeError, NarrativeErrorKind, NovelcraftResult};
use novelcraft_interface::{NovelcraftDriver, TokenCounting};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, instrument, warn};

/// Default retained-turn budget in tokens.
pub const DEFAULT_TOKEN_BUDGET: usize = 20_000;

/// One (prompt, response) exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Turn {
    /// What was sent
    input: String,
    /// What came back
    output: String,
}

impl Turn {
    /// Create a turn.
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    fn render(&self) -> String {
        format!("Human: {}\nAI: {}", self.input, self.output)
    }
}

/// Folds evicted turns into a running summary.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Extend `previous` with `new_lines`, returning the new summary.
    async fn summarize(&self, previous: Option<&str>, new_lines: &str) -> NovelcraftResult<String>;
}

/// Summarizer backed by a driver call.
pub struct LlmSummarizer<'a, D: ?Sized> {
    driver: &'a D,
    params: GenerationParams,
}

impl<'a, D: NovelcraftDriver + ?Sized> LlmSummarizer<'a, D> {
    /// Summarize through `driver` with the given sampling parameters.
    pub fn new(driver: &'a D, params: GenerationParams) -> Self {
        Self { driver, params }
    }
}

#[async_trait]
impl<'a, D: NovelcraftDriver + ?Sized> Summarizer for LlmSummarizer<'a, D> {
    #[instrument(skip_all, fields(new_chars = new_lines.len()))]
    async fn summarize(&self, previous: Option<&str>, new_lines: &str) -> NovelcraftResult<String> {
        let request = GenerateRequest::builder()
            .messages(prompts::summarizer_messages(previous, new_lines))
            .temperature(*self.params.temperature())
            .max_tokens(*self.params.max_tokens())
            .build()
            .map_err(|e| NarrativeError::new(NarrativeErrorKind::RequestBuild(e.to_string())))?;

        let response = self.driver.generate(&request).await?;
        let summary = response.text().trim().to_string();
        if summary.is_empty() {
            return Err(NarrativeError::new(NarrativeErrorKind::Summarization(
                "summarizer returned empty text".to_string(),
            ))
            .into());
        }
        Ok(summary)
    }
}

/// Bounded transcript of one story session.
///
/// Retained turns are kept under `token_budget`; older turns are folded
/// into `summary`. The newest turn is always retained verbatim.
///
/// # Examples
///
/// ```
/// use novelcraft_narrative::ConversationMemory;
///
/// let memory = ConversationMemory::new(1_000);
/// assert_eq!(memory.turn_count(), 0);
/// assert!(memory.load().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ConversationMemory {
    /// Verbatim turns, oldest first
    turns: VecDeque<Turn>,
    /// Running summary of evicted turns
    summary: Option<String>,
    /// Token ceiling for retained turns
    token_budget: usize,
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_BUDGET)
    }
}

impl ConversationMemory {
    /// Empty memory with the given budget.
    pub fn new(token_budget: usize) -> Self {
        Self {
            turns: VecDeque::new(),
            summary: None,
            token_budget,
        }
    }

    /// Number of retained verbatim turns.
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// Tokens held by retained turns; the summary is not counted.
    pub fn token_count(&self, counter: &dyn TokenCounting) -> NovelcraftResult<usize> {
        let mut total = 0;
        for turn in &self.turns {
            total += counter.count_tokens(&turn.input)? + counter.count_tokens(&turn.output)?;
        }
        Ok(total)
    }

    /// Conversation history as chat messages.
    ///
    /// A system message carrying the summary comes first when one exists,
    /// followed by each retained turn as a user then assistant message.
    pub fn load(&self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.turns.len() * 2 + 1);
        if let Some(summary) = &self.summary {
            messages.push(Message::system(summary.clone()));
        }
        for turn in &self.turns {
            messages.push(Message::user(turn.input.clone()));
            messages.push(Message::assistant(turn.output.clone()));
        }
        messages
    }

    /// Plain-text transcript for embedding inside a prompt.
    pub fn render_history(&self) -> String {
        let mut parts = Vec::with_capacity(self.turns.len() + 1);
        if let Some(summary) = &self.summary {
            parts.push(format!("System: {}", summary));
        }
        parts.extend(self.turns.iter().map(Turn::render));
        parts.join("\n")
    }

    /// Drop all turns and the summary.
    pub fn clear(&mut self) {
        self.turns.clear();
        self.summary = None;
    }

    /// Append a turn, compacting the oldest turns when over budget.
    ///
    /// On error the memory is left exactly as it was before the call.
    ///
    /// # Errors
    ///
    /// Propagates token counting and summarizer failures.
    #[instrument(skip_all, fields(turns = self.turns.len(), budget = self.token_budget))]
    pub async fn save_turn(
        &mut self,
        input: impl Into<String>,
        output: impl Into<String>,
        counter: &dyn TokenCounting,
        summarizer: &dyn Summarizer,
    ) -> NovelcraftResult<()> {
        self.turns.push_back(Turn::new(input, output));

        let sizes: NovelcraftResult<Vec<usize>> = self
            .turns
            .iter()
            .map(|turn| -> NovelcraftResult<usize> {
                Ok(counter.count_tokens(&turn.input)? + counter.count_tokens(&turn.output)?)
            })
            .collect();
        let sizes = match sizes {
            Ok(sizes) => sizes,
            Err(e) => {
                self.turns.pop_back();
                return Err(e);
            }
        };

        let mut total: usize = sizes.iter().sum();
        if total <= self.token_budget {
            debug!(total, "Memory within budget");
            return Ok(());
        }

        let mut evicted = Vec::new();
        for size in sizes {
            if total <= self.token_budget || self.turns.len() <= 1 {
                break;
            }
            if let Some(turn) = self.turns.pop_front() {
                total -= size;
                evicted.push(turn);
            }
        }

        if total > self.token_budget {
            warn!(total, budget = self.token_budget, "Newest turn alone exceeds memory budget");
        }
        if evicted.is_empty() {
            return Ok(());
        }

        let new_lines = evicted
            .iter()
            .map(Turn::render)
            .collect::<Vec<_>>()
            .join("\n");
        debug!(evicted = evicted.len(), retained_tokens = total, "Compacting memory");

        match summarizer.summarize(self.summary.as_deref(), &new_lines).await {
            Ok(summary) => {
                self.summary = Some(summary);
                Ok(())
            }
            Err(e) => {
                for turn in evicted.into_iter().rev() {
                    self.turns.push_front(turn);
                }
                self.turns.pop_back();
                Err(e)
            }
        }
    }
}
