use crate::openai_compat::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use novelcraft_core::{FinishReason, GenerateRequest, GenerateResponse, TokenUsage};
use novelcraft_error::{
    HttpError, ModelsError, ModelsErrorKind, NovelcraftError, NovelcraftResult,
};
use novelcraft_interface::NovelcraftDriver;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, instrument};

/// HTTP client for an OpenAI-compatible chat-completions endpoint.
///
/// Does not retry; every failure is surfaced to the caller.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
    provider: &'static str,
}

impl OpenAICompatibleClient {
    /// Creates a client with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns `HttpError` if the underlying HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        provider: &'static str,
        timeout: Duration,
    ) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        let model = model.into();
        debug!(provider, model = %model, "Creating OpenAI-compatible client");
        Ok(Self {
            client,
            api_key: api_key.into(),
            model,
            endpoint: endpoint.into(),
            provider,
        })
    }

    /// Endpoint URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn convert_request(&self, req: &GenerateRequest) -> ChatCompletionRequest {
        let model = req.model().clone().unwrap_or_else(|| self.model.clone());
        let messages = req.messages().iter().map(ChatMessage::from).collect();
        ChatCompletionRequest::new(model, messages, *req.temperature(), *req.max_tokens())
    }

    fn convert_response(response: ChatCompletionResponse) -> Result<GenerateResponse, ModelsError> {
        let choice = response
            .choices()
            .first()
            .ok_or_else(|| ModelsError::new(ModelsErrorKind::EmptyResponse))?;

        let usage = response
            .usage()
            .map(|u| TokenUsage::new(*u.prompt_tokens(), *u.completion_tokens()));

        GenerateResponse::builder()
            .text(choice.message().content().clone())
            .finish_reason(choice.finish_reason().as_deref().map(FinishReason::from_api_str))
            .usage(usage)
            .build()
            .map_err(|e| ModelsError::new(ModelsErrorKind::Builder(e.to_string())))
    }
}

/// Map a non-success HTTP status and body to an error kind.
///
/// # Examples
///
/// ```
/// use novelcraft_error::ModelsErrorKind;
/// use novelcraft_models::classify_status;
/// use reqwest::StatusCode;
///
/// let kind = classify_status(StatusCode::TOO_MANY_REQUESTS, "slow down".into());
/// assert!(matches!(kind, ModelsErrorKind::RateLimit(_)));
/// ```
pub fn classify_status(status: StatusCode, body: String) -> ModelsErrorKind {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ModelsErrorKind::Authentication(body),
        StatusCode::TOO_MANY_REQUESTS => ModelsErrorKind::RateLimit(body),
        _ => ModelsErrorKind::Api {
            status: status.as_u16(),
            message: body,
        },
    }
}

#[async_trait::async_trait]
impl NovelcraftDriver for OpenAICompatibleClient {
    #[instrument(
        skip(self, req),
        fields(provider = self.provider, model = %self.model, messages = req.messages().len())
    )]
    async fn generate(&self, req: &GenerateRequest) -> NovelcraftResult<GenerateResponse> {
        let body = self.convert_request(req);
        debug!(
            temperature = ?body.temperature(),
            max_tokens = ?body.max_tokens(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Chat completion request failed");
                if e.is_timeout() {
                    NovelcraftError::from(ModelsError::new(ModelsErrorKind::Timeout(e.to_string())))
                } else {
                    NovelcraftError::from(HttpError::new(format!("Request failed: {}", e)))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Provider returned error");
            return Err(ModelsError::new(classify_status(status, body)).into());
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to decode chat completion");
            ModelsError::new(ModelsErrorKind::ResponseParsing(e.to_string()))
        })?;

        let response = Self::convert_response(parsed)?;
        debug!(
            chars = response.text().len(),
            finish_reason = ?response.finish_reason(),
            "Received chat completion"
        );
        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        self.provider
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
