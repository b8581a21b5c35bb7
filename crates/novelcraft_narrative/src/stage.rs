//! The five-phase narrative arc that conditions chapter prompts.

use novelcraft_error::{NarrativeError, NarrativeErrorKind};
use serde::{Deserialize, Serialize};

/// Chapters written per stage.
pub const CHAPTERS_PER_STAGE: usize = 2;

/// Chapter numbers the stage table can resolve.
pub const MAX_CHAPTERS: usize = CHAPTERS_PER_STAGE * 5;

/// Chapters in one story session, `Chapter(0)` through `Chapter(8)`.
/// The resolution stage is written once.
pub const STORY_CHAPTERS: usize = MAX_CHAPTERS - 1;

/// A phase of the narrative arc.
///
/// Chapters map onto stages two at a time, so chapters 0 and 1 are
/// exposition and chapters 8 and 9 are the resolution.
///
/// # Examples
///
/// ```
/// use novelcraft_narrative::Stage;
///
/// assert_eq!(Stage::from_chapter(3).unwrap(), Stage::Development);
/// assert_eq!(Stage::Climax.next(), Some(Stage::Resolution));
/// assert_eq!(Stage::Resolution.next(), None);
/// assert!(Stage::from_chapter(10).is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Stage {
    /// Introduces the characters, the setting and where events take place
    Exposition,
    /// Events build toward conflict between characters
    Development,
    /// A reversal; the protagonist fails
    Crisis,
    /// A solution is found and carried out
    Climax,
    /// Conflicts resolve and the story ends
    Resolution,
}

impl Stage {
    /// Stage for a zero-based chapter number.
    ///
    /// # Errors
    ///
    /// Returns `StageOutOfRange` for chapters at or beyond [`MAX_CHAPTERS`].
    pub fn from_chapter(chapter: usize) -> Result<Self, NarrativeError> {
        Self::from_index(chapter / CHAPTERS_PER_STAGE)
            .ok_or_else(|| NarrativeError::new(NarrativeErrorKind::StageOutOfRange { chapter }))
    }

    /// Stage at a zero-based table position.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Stage::Exposition),
            1 => Some(Stage::Development),
            2 => Some(Stage::Crisis),
            3 => Some(Stage::Climax),
            4 => Some(Stage::Resolution),
            _ => None,
        }
    }

    /// Zero-based table position.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The following stage, or `None` at the end of the arc.
    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Role text completing "You are an experienced novelist who ...".
    pub fn description(&self) -> &'static str {
        match self {
            Stage::Exposition => {
                "writes Expositions that introduce the characters and setting of your novel and where events take place."
            }
            Stage::Development => {
                "writes Development which a series of events leads to conflict between characters."
            }
            Stage::Crisis => {
                "writes crises, where a reversal of events occurs, a new situation emerges, and the protagonist ultimately fails."
            }
            Stage::Climax => {
                "writes a climax in which a solution to a new situation is realized, the protagonist implements it, and the conflict shifts."
            }
            Stage::Resolution => {
                "writes endings where the protagonist wraps up the case, all conflicts are resolved, and the story ends."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_two_chapters_per_stage() {
        for (index, stage) in Stage::iter().enumerate() {
            assert_eq!(stage.index(), index);
            assert_eq!(Stage::from_chapter(index * 2).unwrap(), stage);
            assert_eq!(Stage::from_chapter(index * 2 + 1).unwrap(), stage);
        }
    }

    #[test]
    fn test_out_of_range_carries_chapter() {
        let err = Stage::from_chapter(MAX_CHAPTERS).unwrap_err();
        assert_eq!(
            err.kind,
            NarrativeErrorKind::StageOutOfRange {
                chapter: MAX_CHAPTERS
            }
        );
    }

    #[test]
    fn test_descriptions_are_distinct() {
        let mut seen: Vec<&str> = Stage::iter().map(|s| s.description()).collect();
        seen.dedup();
        assert_eq!(seen.len(), 5);
        assert!(seen.iter().all(|d| d.starts_with("writes")));
    }
}
