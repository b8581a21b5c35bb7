//! Story generation error types.

/// Specific error conditions for story generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum NarrativeErrorKind {
    /// Chapter number maps past the last narrative stage
    #[display("Chapter {} is beyond the final narrative stage", chapter)]
    StageOutOfRange {
        /// The requested zero-based chapter number
        chapter: usize,
    },
    /// Caller supplied an empty or whitespace-only prompt
    #[display("Prompt for {} is empty", _0)]
    EmptyPrompt(String),
    /// Session operation invoked from the wrong state
    #[display("Cannot move story session from {} to {}", from, to)]
    InvalidTransition {
        /// Current state
        from: String,
        /// Attempted state
        to: String,
    },
    /// Failed to build a generation request
    #[display("Failed to build request: {}", _0)]
    RequestBuild(String),
    /// Memory compaction could not produce a summary
    #[display("Conversation summarization failed: {}", _0)]
    Summarization(String),
}

/// Error type for story generation operations.
///
/// # Examples
///
/// ```
/// use novelcraft_error::{NarrativeError, NarrativeErrorKind};
///
/// let err = NarrativeError::new(NarrativeErrorKind::StageOutOfRange { chapter: 10 });
/// assert!(format!("{}", err).contains("Chapter 10"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Narrative Error: {} at line {} in {}", kind, line, file)]
pub struct NarrativeError {
    /// The specific error condition
    pub kind: NarrativeErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl NarrativeError {
    /// Create a new NarrativeError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: NarrativeErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
