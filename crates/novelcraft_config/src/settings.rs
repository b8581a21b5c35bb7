use config::{Config, ConfigBuilder, File, FileFormat, builder::DefaultState};
use derive_getters::Getters;
use novelcraft_error::{ConfigError, NovelcraftError, NovelcraftResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../novelcraft.toml");

/// Where requests go and how long to wait for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ProviderConfig {
    /// Provider label used in logs (e.g. "openai")
    name: String,
    /// Chat-completions endpoint URL
    base_url: String,
    /// Model identifier
    model: String,
    /// Environment variable holding the API key
    api_key_env: String,
    /// Request timeout in seconds
    timeout_secs: u64,
}

impl ProviderConfig {
    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Sampling parameters for one kind of LLM call.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Getters)]
pub struct GenerationParams {
    /// Sampling temperature, `0.0..=2.0`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Completion cap; `None` leaves it to the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl GenerationParams {
    /// Parameters with both knobs set explicitly.
    pub fn new(temperature: Option<f32>, max_tokens: Option<u32>) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(ConfigError::new(format!(
                    "generation.{}.temperature must be within 0.0..=2.0, got {}",
                    name, t
                )));
            }
        }
        if self.max_tokens == Some(0) {
            return Err(ConfigError::new(format!(
                "generation.{}.max_tokens must be positive",
                name
            )));
        }
        Ok(())
    }
}

/// Per-use-case sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Getters)]
pub struct GenerationConfig {
    /// Setting card generation
    setting: GenerationParams,
    /// Prologue generation
    prologue: GenerationParams,
    /// Chapter summaries and recommendations
    chapter: GenerationParams,
    /// Memory compaction
    summarizer: GenerationParams,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            setting: GenerationParams::new(Some(1.2), Some(800)),
            prologue: GenerationParams::new(Some(1.2), Some(800)),
            chapter: GenerationParams::new(Some(1.2), None),
            summarizer: GenerationParams::new(Some(0.0), None),
        }
    }
}

/// Conversation memory sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct MemoryConfig {
    /// Token budget before the oldest turns are folded into the summary
    token_budget: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            token_budget: 20_000,
        }
    }
}

/// Complete Novelcraft configuration.
///
/// # Example
///
/// ```no_run
/// use novelcraft_config::NovelcraftConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = NovelcraftConfig::load()?;
/// println!("model: {}", config.provider().model());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct NovelcraftConfig {
    /// LLM endpoint settings
    provider: ProviderConfig,
    /// Sampling parameters
    generation: GenerationConfig,
    /// Memory sizing
    memory: MemoryConfig,
}

impl NovelcraftConfig {
    /// The bundled defaults with no user overrides.
    ///
    /// # Errors
    ///
    /// Fails only if the bundled file itself is malformed.
    pub fn bundled() -> NovelcraftResult<Self> {
        Self::finish(Self::defaults())
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> NovelcraftResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(config_dir) = dirs::home_dir() {
            let home_config = config_dir.join(".config/novelcraft/novelcraft.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("novelcraft").required(false));

        Self::finish(builder)
    }

    /// Load an explicit file merged over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing, malformed or invalid.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> NovelcraftResult<Self> {
        debug!("Loading configuration from file");

        let path = path.as_ref();
        if !path.exists() {
            return Err(NovelcraftError::from(ConfigError::new(format!(
                "Configuration file not found: {}",
                path.display()
            ))));
        }

        Self::finish(Self::defaults().add_source(File::from(path)))
    }

    /// Check value ranges the type system cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` naming the first offending key.
    pub fn validate(&self) -> NovelcraftResult<()> {
        self.generation.setting.validate("setting")?;
        self.generation.prologue.validate("prologue")?;
        self.generation.chapter.validate("chapter")?;
        self.generation.summarizer.validate("summarizer")?;

        if self.memory.token_budget == 0 {
            return Err(ConfigError::new("memory.token_budget must be positive").into());
        }
        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::new("provider.timeout_secs must be positive").into());
        }
        if self.provider.model.trim().is_empty() {
            return Err(ConfigError::new("provider.model must not be empty").into());
        }
        Ok(())
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> NovelcraftResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                NovelcraftError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                NovelcraftError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }
}
