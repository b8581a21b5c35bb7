//! Command handlers.

use novelcraft::{
    ConversationMemory, IoError, JsonError, NovelcraftConfig, NovelcraftResult, StorySetting,
    build_generator, write_story,
};
use std::path::Path;
use tracing::instrument;

/// Print a setting card for `prompt`.
#[instrument(skip(config, prompt))]
pub async fn run_setting(config: &NovelcraftConfig, prompt: &str) -> NovelcraftResult<()> {
    let generator = build_generator(config)?;
    let setting = generator.generate_setting(prompt).await?;
    print_json(&setting)
}

/// Print a prologue for the setting stored at `path`.
#[instrument(skip(config, path), fields(path = %path.display()))]
pub async fn run_prologue(config: &NovelcraftConfig, path: &Path) -> NovelcraftResult<()> {
    let setting = read_setting(path)?;
    let generator = build_generator(config)?;
    let prologue = generator.generate_prolog(&setting).await?;
    print_json(&prologue)
}

/// Print one chapter generated with fresh memory.
#[instrument(skip(config, prompt))]
pub async fn run_chapter(
    config: &NovelcraftConfig,
    chapter: usize,
    prompt: &str,
) -> NovelcraftResult<()> {
    let generator = build_generator(config)?;
    let mut memory = ConversationMemory::new(*config.memory().token_budget());
    let result = generator
        .generate_chapter_summary(chapter, prompt, &mut memory)
        .await?;
    print_json(&result)
}

/// Write a whole story, printing each part as it arrives.
#[instrument(skip(config, prompt))]
pub async fn run_write(
    config: &NovelcraftConfig,
    prompt: &str,
    chapters: usize,
    pick: usize,
) -> NovelcraftResult<()> {
    let generator = build_generator(config)?;
    let mut out = std::io::stdout();
    write_story(
        generator,
        *config.memory().token_budget(),
        prompt,
        chapters,
        pick,
        &mut out,
    )
    .await?;
    Ok(())
}

fn read_setting(path: &Path) -> NovelcraftResult<StorySetting> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        IoError::new(format!("Failed to read setting file {}: {}", path.display(), e))
    })?;
    let setting = serde_json::from_str(&text)
        .map_err(|e| JsonError::new(format!("Invalid setting JSON: {}", e)))?;
    Ok(setting)
}

fn print_json<T: serde::Serialize>(value: &T) -> NovelcraftResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| JsonError::new(format!("Failed to serialize output: {}", e)))?;
    println!("{}", text);
    Ok(())
}
