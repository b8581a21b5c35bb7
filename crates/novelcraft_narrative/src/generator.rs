//! The three generation use-cases: setting, prologue and chapter.

use crate::memory::{ConversationMemory, LlmSummarizer};
use crate::parser::{parse_recommendations, parse_setting, strip_recommendation_paths};
use crate::prompts;
use crate::stage::Stage;
use crate::types::{ChapterResult, Prologue, StorySetting};
use novelcraft_config::{GenerationConfig, GenerationParams};
use novelcraft_core::{GenerateRequest, Message, Tokenizer};
use novelcraft_error::{NarrativeError, NarrativeErrorKind, NovelcraftResult};
use novelcraft_interface::{NovelcraftDriver, TokenCounting};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Runs story generation calls against a driver.
///
/// Holds no per-story state; conversation memory is passed to each chapter
/// call explicitly.
pub struct StoryGenerator<D: NovelcraftDriver> {
    driver: D,
    config: GenerationConfig,
    counter: Arc<dyn TokenCounting>,
}

impl<D: NovelcraftDriver> StoryGenerator<D> {
    /// Create a generator with default sampling parameters and the
    /// `cl100k_base` tokenizer.
    ///
    /// # Errors
    ///
    /// Fails if the tokenizer tables cannot be loaded.
    pub fn new(driver: D) -> NovelcraftResult<Self> {
        let tokenizer = Tokenizer::cl100k()?;
        Ok(Self {
            driver,
            config: GenerationConfig::default(),
            counter: Arc::new(tokenizer),
        })
    }

    /// Create a generator with an explicit token counter.
    pub fn with_counter(driver: D, counter: Arc<dyn TokenCounting>) -> Self {
        Self {
            driver,
            config: GenerationConfig::default(),
            counter,
        }
    }

    /// Replace the sampling parameters.
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Sampling parameters in use.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Token counter used for memory budgeting.
    pub fn counter(&self) -> &dyn TokenCounting {
        self.counter.as_ref()
    }

    /// Generate a setting card from a free-text idea.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPrompt` for a blank prompt and propagates driver errors.
    /// Parse problems only leave fields empty.
    #[instrument(skip(self, prompt), fields(model = self.driver.model_name(), prompt_len = prompt.len()))]
    pub async fn generate_setting(&self, prompt: &str) -> NovelcraftResult<StorySetting> {
        if prompt.trim().is_empty() {
            return Err(NarrativeError::new(NarrativeErrorKind::EmptyPrompt("setting".into())).into());
        }

        let text = self
            .complete(prompts::setting_messages(prompt), self.config.setting())
            .await?;
        debug!(response_len = text.len(), "Received setting response");

        let setting = parse_setting(text.trim());
        info!(title = %setting.title(), "Generated story setting");
        Ok(setting)
    }

    /// Generate a prologue for a setting. The text is returned as produced.
    ///
    /// # Errors
    ///
    /// Propagates driver errors.
    #[instrument(skip(self, setting), fields(model = self.driver.model_name(), title = %setting.title()))]
    pub async fn generate_prolog(&self, setting: &StorySetting) -> NovelcraftResult<Prologue> {
        if setting.is_empty() {
            warn!("Generating prologue for an empty setting");
        }
        let text = self
            .complete(prompts::prologue_messages(&setting.render()), self.config.prologue())
            .await?;
        debug!(response_len = text.len(), "Received prologue");
        Ok(Prologue::new(text))
    }

    /// Generate one chapter and branches for the next.
    ///
    /// Prior turns are sent once, as history messages, and the saved turn
    /// holds only the story prompt and the model's prose. The chapter turn
    /// is saved to `memory` before recommendations are requested. Recommendations are conditioned on the transcript as it
    /// was before this chapter. At the final stage no recommendations are
    /// requested. A failed recommendation call still returns the chapter.
    ///
    /// # Errors
    ///
    /// Returns `StageOutOfRange` before any call for chapters past the arc,
    /// `EmptyPrompt` for a blank story prompt, and propagates failures of
    /// the chapter call or memory compaction.
    #[instrument(skip(self, story_prompt, memory), fields(model = self.driver.model_name()))]
    pub async fn generate_chapter_summary(
        &self,
        chapter: usize,
        story_prompt: &str,
        memory: &mut ConversationMemory,
    ) -> NovelcraftResult<ChapterResult> {
        let stage = Stage::from_chapter(chapter)?;
        let next_stage = stage.next();
        debug!(%stage, next_stage = ?next_stage, "Resolved narrative stage");

        if story_prompt.trim().is_empty() {
            return Err(NarrativeError::new(NarrativeErrorKind::EmptyPrompt("chapter".into())).into());
        }

        let history = memory.load();
        let prompt = prompts::chapter_prompt(story_prompt);

        let raw = self
            .complete(
                prompts::chapter_messages(stage, &history, &prompt),
                self.config.chapter(),
            )
            .await?;
        debug!(response_len = raw.len(), "Received chapter prose");

        let summarizer = LlmSummarizer::new(&self.driver, *self.config.summarizer());
        memory
            .save_turn(prompt, raw.clone(), self.counter.as_ref(), &summarizer)
            .await?;

        let final_summary = strip_recommendation_paths(&raw);

        let recommendations = match next_stage {
            None => {
                debug!("Final stage reached; no recommendations requested");
                Vec::new()
            }
            Some(next) => {
                let messages = prompts::recommendation_messages(next, &history, &raw);
                match self.complete(messages, self.config.chapter()).await {
                    Ok(text) => parse_recommendations(&text),
                    Err(e) => {
                        warn!(error = %e, "Recommendation call failed; returning chapter without branches");
                        Vec::new()
                    }
                }
            }
        };

        info!(
            chapter,
            %stage,
            recommendations = recommendations.len(),
            "Generated chapter"
        );
        Ok(ChapterResult::new(final_summary, recommendations))
    }

    async fn complete(
        &self,
        messages: Vec<Message>,
        params: &GenerationParams,
    ) -> NovelcraftResult<String> {
        let request = GenerateRequest::builder()
            .messages(messages)
            .temperature(*params.temperature())
            .max_tokens(*params.max_tokens())
            .build()
            .map_err(|e| NarrativeError::new(NarrativeErrorKind::RequestBuild(e.to_string())))?;

        let response = self.driver.generate(&request).await?;
        if response.is_truncated() {
            warn!("Response hit the token cap and may be truncated");
        }
        Ok(response.text().clone())
    }
}
