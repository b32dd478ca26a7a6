//! HTTP client for the Generative Language API.

use crate::gemini::{conversions, dto::GeminiResponse};
use crate::CrammerDriver;
use async_trait::async_trait;
use crammer_core::{GenerateRequest, GenerateResponse};
use crammer_error::{ConfigError, GenerationError, GenerationErrorKind};
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Base URL of the Generative Language API.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model for structured text generation.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default model for speech synthesis requests.
pub const DEFAULT_TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";

/// Gemini HTTP client.
///
/// A request's `model` field overrides the client default, which is how
/// the speech flows select the TTS model on a shared client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Creates a client for the given key and default model.
    #[instrument(skip_all)]
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, ConfigError> {
        let model = model.into();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| ConfigError::new(format!("failed to create HTTP client: {e}")))?;

        debug!(model = %model, "Created Gemini client");

        Ok(Self {
            client,
            api_key: api_key.into(),
            model,
            base_url: GEMINI_API_BASE.to_string(),
        })
    }

    /// Creates a client from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ConfigError::new("GEMINI_API_KEY environment variable not set"))?;
        Self::new(api_key, DEFAULT_MODEL)
    }

    /// Override the API base URL. Used to point at a local stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl CrammerDriver for GeminiClient {
    #[instrument(skip(self, request), fields(model = request.model.as_deref().unwrap_or(&self.model)))]
    async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, GenerationError> {
        let model = request.model.as_deref().unwrap_or(&self.model);
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let body = conversions::to_gemini_request(request);

        debug!(
            model = %model,
            contents = body.contents.len(),
            tools = body.tools.as_ref().map(|t| t.len()).unwrap_or(0),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "HTTP request failed");
                GenerationError::new(GenerationErrorKind::Http(format!("request failed: {e}")))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, message = %message, "API error");
            let kind = match status.as_u16() {
                429 => GenerationErrorKind::RateLimited { message },
                503 => GenerationErrorKind::Unavailable { message },
                code => GenerationErrorKind::Api {
                    status: code,
                    message,
                },
            };
            return Err(GenerationError::new(kind));
        }

        let wire: GeminiResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse response");
            GenerationError::new(GenerationErrorKind::InvalidResponse(format!(
                "failed to parse JSON: {e}"
            )))
        })?;

        debug!(candidates = wire.candidates.len(), "Received response");
        conversions::from_gemini_response(wire)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
