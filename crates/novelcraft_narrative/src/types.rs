//! Structured values produced by the story pipeline.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Story metadata extracted from the setting generation call.
///
/// Any field may be empty when the model omitted or mangled its line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct StorySetting {
    /// Novel title
    #[serde(default)]
    title: String,
    /// Genre
    #[serde(default)]
    genre: String,
    /// Central theme
    #[serde(default)]
    theme: String,
    /// Narrative tone
    #[serde(default)]
    tone: String,
    /// Time and place
    #[serde(default)]
    setting: String,
    /// Character sketches, space-joined
    #[serde(default)]
    characters: String,
}

impl StorySetting {
    /// Assemble a setting from its six fields.
    pub fn new(
        title: impl Into<String>,
        genre: impl Into<String>,
        theme: impl Into<String>,
        tone: impl Into<String>,
        setting: impl Into<String>,
        characters: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
            theme: theme.into(),
            tone: tone.into(),
            setting: setting.into(),
            characters: characters.into(),
        }
    }

    /// True when every field is empty.
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_empty())
    }

    /// Labelled fields in card order.
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("Title", self.title.as_str()),
            ("Genre", self.genre.as_str()),
            ("Theme", self.theme.as_str()),
            ("Tone", self.tone.as_str()),
            ("Setting", self.setting.as_str()),
            ("Characters", self.characters.as_str()),
        ]
    }

    /// Render back into `Field: value` lines, skipping empty fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use novelcraft_narrative::StorySetting;
    ///
    /// let setting = StorySetting::new("Foo", "Bar", "", "", "", "");
    /// assert_eq!(setting.render(), "Title: Foo\nGenre: Bar");
    /// ```
    pub fn render(&self) -> String {
        self.fields()
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(crate) fn set(&mut self, key: SettingKey, value: String) {
        match key {
            SettingKey::Title => self.title = value,
            SettingKey::Genre => self.genre = value,
            SettingKey::Theme => self.theme = value,
            SettingKey::Tone => self.tone = value,
            SettingKey::Setting => self.setting = value,
            SettingKey::Characters => self.characters = value,
        }
    }

    pub(crate) fn get(&self, key: SettingKey) -> &str {
        match key {
            SettingKey::Title => &self.title,
            SettingKey::Genre => &self.genre,
            SettingKey::Theme => &self.theme,
            SettingKey::Tone => &self.tone,
            SettingKey::Setting => &self.setting,
            SettingKey::Characters => &self.characters,
        }
    }

    pub(crate) fn characters_mut(&mut self) -> &mut String {
        &mut self.characters
    }
}

/// Line prefixes recognized in a setting card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter)]
pub(crate) enum SettingKey {
    Title,
    Genre,
    Theme,
    Tone,
    Setting,
    Characters,
}

impl SettingKey {
    pub(crate) fn prefix(&self) -> &'static str {
        match self {
            SettingKey::Title => "Title:",
            SettingKey::Genre => "Genre:",
            SettingKey::Theme => "Theme:",
            SettingKey::Tone => "Tone:",
            SettingKey::Setting => "Setting:",
            SettingKey::Characters => "Characters:",
        }
    }
}

/// A proposed branch for the next chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Recommendation {
    /// Short headline
    #[serde(rename = "Title")]
    title: String,
    /// One or two sentences describing the branch
    #[serde(rename = "Description")]
    description: String,
}

impl Recommendation {
    /// Create a recommendation.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Output of the prologue call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Prologue {
    /// Raw model text, untouched
    prologue: String,
}

impl Prologue {
    /// Wrap prologue text.
    pub fn new(prologue: impl Into<String>) -> Self {
        Self {
            prologue: prologue.into(),
        }
    }
}

/// One chapter turn: the cleaned prose plus up to three branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChapterResult {
    /// Chapter prose with any trailing recommendation section removed
    final_summary: String,
    /// Branches for the next chapter; empty at the final stage
    recommendations: Vec<Recommendation>,
}

impl ChapterResult {
    /// Create a chapter result.
    pub fn new(final_summary: impl Into<String>, recommendations: Vec<Recommendation>) -> Self {
        Self {
            final_summary: final_summary.into(),
            recommendations,
        }
    }
}
