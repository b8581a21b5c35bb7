//! Writing a whole story by following one recommendation per chapter.

use novelcraft_error::{IoError, NovelcraftResult};
use novelcraft_interface::NovelcraftDriver;
use novelcraft_narrative::{ChapterResult, StoryGenerator, StorySession};
use std::io::Write;
use tracing::{info, instrument, warn};

/// Run a session end to end, writing each part to `out` as it arrives.
///
/// Writes at most `chapters` chapters and stops early once the session is
/// finished. After each chapter the `pick`-th recommendation (1-based)
/// becomes the next story prompt. Out-of-range picks fall back to the first
/// recommendation, and a chapter without recommendations is continued from
/// its own text.
///
/// # Errors
///
/// Propagates generation failures and fails with `IoError` when `out`
/// cannot be written.
#[instrument(skip(generator, prompt, out))]
pub async fn write_story<D: NovelcraftDriver, W: Write>(
    generator: StoryGenerator<D>,
    token_budget: usize,
    prompt: &str,
    chapters: usize,
    pick: usize,
    out: &mut W,
) -> NovelcraftResult<StorySession<D>> {
    let mut session = StorySession::new(generator, token_budget);

    let setting = session.create_setting(prompt).await?.render();
    writeln!(out, "{}\n", setting).map_err(output_error)?;

    let prologue = session.create_prologue().await?.prologue().trim().to_string();
    writeln!(out, "PROLOGUE\n\n{}\n", prologue).map_err(output_error)?;

    let mut story_prompt = prologue;
    for _ in 0..chapters {
        if session.is_finished() {
            break;
        }
        let result = session.next_chapter(&story_prompt).await?.clone();
        let number = session.chapters().len();
        writeln!(out, "CHAPTER {}\n\n{}\n", number, result.final_summary()).map_err(output_error)?;
        for (i, rec) in result.recommendations().iter().enumerate() {
            writeln!(out, "  {}. {} - {}", i + 1, rec.title(), rec.description())
                .map_err(output_error)?;
        }
        if !result.recommendations().is_empty() {
            writeln!(out).map_err(output_error)?;
        }

        story_prompt = next_prompt(&session, &result, pick);
    }

    info!(chapters = session.chapters().len(), "Story complete");
    Ok(session)
}

/// Story prompt for the chapter after `result`.
pub fn next_prompt<D: NovelcraftDriver>(
    session: &StorySession<D>,
    result: &ChapterResult,
    pick: usize,
) -> String {
    let recommendations = result.recommendations();
    match recommendations
        .get(pick.saturating_sub(1))
        .or_else(|| recommendations.first())
    {
        Some(rec) => session.choose(rec),
        None => {
            if !session.is_finished() {
                warn!("No recommendations; continuing from the chapter text");
            }
            result.final_summary().clone()
        }
    }
}

fn output_error(e: std::io::Error) -> IoError {
    IoError::new(format!("Failed to write story output: {}", e))
}
