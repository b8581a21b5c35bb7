use crate::openai_compat::OpenAICompatibleClient;
use async_trait::async_trait;
use novelcraft_core::{GenerateRequest, GenerateResponse, Tokenizer};
use novelcraft_error::{ModelsError, ModelsErrorKind, ModelsResult, NovelcraftResult};
use novelcraft_interface::{ModelMetadata, NovelcraftDriver, TokenCounting};
use std::time::Duration;
use tracing::instrument;

/// Default chat-completions endpoint.
pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Environment variable holding the API key.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// OpenAI driver.
#[derive(Debug, Clone)]
pub struct OpenAIDriver {
    inner: OpenAICompatibleClient,
    tokenizer: Tokenizer,
}

impl OpenAIDriver {
    /// Creates a new OpenAI driver.
    ///
    /// Reads the API key from the `OPENAI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns `MissingApiKey` if the variable is not set.
    #[instrument(skip_all, fields(model = %model.as_ref()))]
    pub fn new(model: impl AsRef<str>) -> ModelsResult<Self> {
        Self::from_env(OPENAI_API_KEY_ENV, model.as_ref(), OPENAI_CHAT_URL, DEFAULT_TIMEOUT)
    }

    /// Creates a driver reading its key from `key_env` and posting to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns `MissingApiKey` if `key_env` is unset or empty.
    #[instrument(skip_all, fields(model = %model, endpoint = %endpoint))]
    pub fn from_env(
        key_env: &str,
        model: &str,
        endpoint: &str,
        timeout: Duration,
    ) -> ModelsResult<Self> {
        let api_key = std::env::var(key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ModelsError::new(ModelsErrorKind::MissingApiKey(key_env.to_string())))?;
        Self::with_api_key(api_key, model, endpoint, timeout)
    }

    /// Creates a driver with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client or tokenizer cannot be initialized.
    #[instrument(skip(api_key))]
    pub fn with_api_key(
        api_key: String,
        model: &str,
        endpoint: &str,
        timeout: Duration,
    ) -> ModelsResult<Self> {
        let inner = OpenAICompatibleClient::new(api_key, model, endpoint, "openai", timeout)
            .map_err(|e| ModelsError::new(ModelsErrorKind::Builder(e.to_string())))?;
        let tokenizer = Tokenizer::for_model(model)?;
        Ok(Self { inner, tokenizer })
    }

    /// Context limits for well-known chat models.
    pub fn metadata(&self) -> ModelsResult<ModelMetadata> {
        let model = self.inner.model_name();
        let (max_input_tokens, max_output_tokens) = match model {
            m if m.starts_with("gpt-3.5-turbo") => (16_385usize, 4_096usize),
            m if m.starts_with("gpt-4o") => (128_000, 16_384),
            m if m.starts_with("gpt-4-turbo") => (128_000, 4_096),
            m if m.starts_with("gpt-4") => (8_192, 8_192),
            _ => (16_385, 4_096),
        };
        ModelMetadata::builder()
            .provider("openai")
            .model(model)
            .max_input_tokens(max_input_tokens)
            .max_output_tokens(max_output_tokens)
            .build()
            .map_err(|e| ModelsError::new(ModelsErrorKind::Builder(e.to_string())))
    }
}

#[async_trait]
impl NovelcraftDriver for OpenAIDriver {
    #[instrument(skip(self, req), fields(provider = "openai", model = %self.inner.model_name()))]
    async fn generate(&self, req: &GenerateRequest) -> NovelcraftResult<GenerateResponse> {
        self.inner.generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}

impl TokenCounting for OpenAIDriver {
    fn count_tokens(&self, text: &str) -> NovelcraftResult<usize> {
        Ok(self.tokenizer.count(text))
    }
}
