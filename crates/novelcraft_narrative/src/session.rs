//! Caller-driven state machine for co-writing one story.

use crate::generator::StoryGenerator;
use crate::memory::ConversationMemory;
use crate::stage::STORY_CHAPTERS;
use crate::types::{ChapterResult, Prologue, Recommendation, StorySetting};
use novelcraft_error::{NarrativeError, NarrativeErrorKind, NovelcraftResult};
use novelcraft_interface::NovelcraftDriver;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Where a story session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum SessionState {
    /// Nothing generated yet
    NotStarted,
    /// Setting card exists
    SettingGenerated,
    /// Prologue exists
    PrologueGenerated,
    /// The given zero-based chapter was the last one written
    #[display("Chapter({})", _0)]
    Chapter(usize),
}

impl SessionState {
    /// Chapter number the next chapter call would write, if any.
    pub fn next_chapter(&self) -> Option<usize> {
        match self {
            SessionState::PrologueGenerated => Some(0),
            SessionState::Chapter(n) if n + 1 < STORY_CHAPTERS => Some(n + 1),
            _ => None,
        }
    }
}

/// One story's generation session.
///
/// Owns the conversation memory, so chapters of one story are serialized
/// through `&mut self` while separate sessions run independently.
pub struct StorySession<D: NovelcraftDriver> {
    generator: StoryGenerator<D>,
    memory: ConversationMemory,
    state: SessionState,
    setting: Option<StorySetting>,
    prologue: Option<Prologue>,
    chapters: Vec<ChapterResult>,
}

impl<D: NovelcraftDriver> StorySession<D> {
    /// Start a session with fresh memory of the given budget.
    pub fn new(generator: StoryGenerator<D>, token_budget: usize) -> Self {
        Self {
            generator,
            memory: ConversationMemory::new(token_budget),
            state: SessionState::NotStarted,
            setting: None,
            prologue: None,
            chapters: Vec::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Setting card, once generated.
    pub fn setting(&self) -> Option<&StorySetting> {
        self.setting.as_ref()
    }

    /// Prologue, once generated.
    pub fn prologue(&self) -> Option<&Prologue> {
        self.prologue.as_ref()
    }

    /// Chapters written so far, in order.
    pub fn chapters(&self) -> &[ChapterResult] {
        &self.chapters
    }

    /// The session transcript.
    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// The generator driving this session.
    pub fn generator(&self) -> &StoryGenerator<D> {
        &self.generator
    }

    /// True once the resolution chapter has been written.
    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Chapter(STORY_CHAPTERS - 1)
    }

    /// Generate the setting card.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless the session has not started; otherwise
    /// whatever setting generation returns. State is unchanged on error.
    #[instrument(skip(self, prompt), fields(state = %self.state))]
    pub async fn create_setting(&mut self, prompt: &str) -> NovelcraftResult<&StorySetting> {
        self.expect_state(SessionState::NotStarted, SessionState::SettingGenerated)?;
        let setting = self.generator.generate_setting(prompt).await?;
        self.state = SessionState::SettingGenerated;
        Ok(self.setting.insert(setting))
    }

    /// Generate the prologue from the stored setting.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless a setting was just generated.
    #[instrument(skip(self), fields(state = %self.state))]
    pub async fn create_prologue(&mut self) -> NovelcraftResult<&Prologue> {
        self.expect_state(SessionState::SettingGenerated, SessionState::PrologueGenerated)?;
        let setting = self.setting.clone().unwrap_or_default();
        let prologue = self.generator.generate_prolog(&setting).await?;
        self.state = SessionState::PrologueGenerated;
        Ok(self.prologue.insert(prologue))
    }

    /// Write the next chapter from `story_prompt`.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` before the prologue or after the final chapter;
    /// otherwise whatever chapter generation returns. State is unchanged
    /// on error.
    #[instrument(skip(self, story_prompt), fields(state = %self.state))]
    pub async fn next_chapter(&mut self, story_prompt: &str) -> NovelcraftResult<&ChapterResult> {
        let chapter = self.state.next_chapter().ok_or_else(|| {
            let to = match self.state {
                SessionState::Chapter(n) => SessionState::Chapter(n + 1).to_string(),
                _ => SessionState::Chapter(0).to_string(),
            };
            NarrativeError::new(NarrativeErrorKind::InvalidTransition {
                from: self.state.to_string(),
                to,
            })
        })?;

        let result = self
            .generator
            .generate_chapter_summary(chapter, story_prompt, &mut self.memory)
            .await?;
        self.state = SessionState::Chapter(chapter);
        debug!(chapter, turns = self.memory.turn_count(), "Chapter appended to session");
        self.chapters.push(result);
        Ok(&self.chapters[self.chapters.len() - 1])
    }

    /// Turn a chosen branch into the next story prompt.
    pub fn choose(&self, recommendation: &Recommendation) -> String {
        format!("{}: {}", recommendation.title(), recommendation.description())
    }

    fn expect_state(&self, expected: SessionState, to: SessionState) -> Result<(), NarrativeError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(NarrativeError::new(NarrativeErrorKind::InvalidTransition {
                from: self.state.to_string(),
                to: to.to_string(),
            }))
        }
    }
}
