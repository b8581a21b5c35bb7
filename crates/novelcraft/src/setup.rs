//! Wiring configuration into drivers and generators.

use novelcraft_config::NovelcraftConfig;
use novelcraft_error::NovelcraftResult;
use novelcraft_models::OpenAIDriver;
use novelcraft_narrative::StoryGenerator;
use tracing::{debug, instrument, warn};

/// Driver for the configured provider.
///
/// # Errors
///
/// Returns `MissingApiKey` when the configured key variable is unset.
#[instrument(skip(config), fields(provider = %config.provider().name(), model = %config.provider().model()))]
pub fn build_driver(config: &NovelcraftConfig) -> NovelcraftResult<OpenAIDriver> {
    let provider = config.provider();
    if provider.name() != "openai" {
        debug!("Treating provider as OpenAI-compatible");
    }
    let driver = OpenAIDriver::from_env(
        provider.api_key_env(),
        provider.model(),
        provider.base_url(),
        provider.timeout(),
    )?;

    let metadata = driver.metadata()?;
    if !metadata.fits(*config.memory().token_budget()) {
        warn!(
            budget = config.memory().token_budget(),
            context = metadata.max_input_tokens(),
            "Memory budget exceeds the model context window"
        );
    }
    Ok(driver)
}

/// Story generator using the configured driver and sampling parameters.
///
/// # Errors
///
/// Propagates driver and tokenizer setup failures.
pub fn build_generator(config: &NovelcraftConfig) -> NovelcraftResult<StoryGenerator<OpenAIDriver>> {
    let driver = build_driver(config)?;
    Ok(StoryGenerator::new(driver)?.with_config(*config.generation()))
}
