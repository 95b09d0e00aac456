//! The validate → call → decode/classify pipeline.
//!
//! A [`Gateway`] owns one provider adapter and the credential for it. Every
//! call to [`Gateway::generate`] is independent: it validates the prompt,
//! issues exactly one upstream request, and folds whatever comes back into a
//! [`GenerationResult`].

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::factory::ProviderFactory;
use crate::{
    Error, GatewayConfig, GeneratedImage, GenerationParams, GenerationRequest, GenerationResult,
    ImageProvider, Prompt,
};

pub const AUTH_FAILED_MESSAGE: &str = "Authentication with the image provider failed";
pub const MODEL_LOADING_MESSAGE: &str = "Model is loading, please try again in a few moments";
pub const RATE_LIMITED_MESSAGE: &str = "Rate limit exceeded, please try again later";
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate image";

const MAX_DIAGNOSTIC_CHARS: usize = 512;

/// Anything that can turn a raw prompt into an image.
///
/// The HTTP layer depends on this rather than on [`Gateway`] directly.
#[async_trait::async_trait]
pub trait ImageGenerator: Send + Sync + 'static {
    /// Generate an image from a prompt taken from a JSON payload.
    async fn generate(&self, prompt: &Value) -> GenerationResult;

    /// Name of the upstream provider.
    fn provider_name(&self) -> &str;

    /// Whether a provider credential is configured.
    fn is_configured(&self) -> bool;
}

/// Image generation gateway for a single provider.
pub struct Gateway {
    client: Client,
    provider: Box<dyn ImageProvider>,
    params: GenerationParams,
    api_key: Option<String>,
    expose_upstream_diagnostics: bool,
}

impl Gateway {
    /// Create a gateway for the provider named in the configuration.
    pub fn new(config: &GatewayConfig) -> Result<Self, Error> {
        let (provider, params) = ProviderFactory::create(config);
        Self::with_provider(config, provider, params)
    }

    /// Create a gateway around an explicit provider adapter.
    pub fn with_provider(
        config: &GatewayConfig,
        provider: Box<dyn ImageProvider>,
        params: GenerationParams,
    ) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            provider,
            params,
            api_key: config.api_key.clone(),
            expose_upstream_diagnostics: config.expose_upstream_diagnostics,
        })
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Generate an image from a prompt string.
    pub async fn generate_text(&self, prompt: &str) -> GenerationResult {
        self.generate(&Value::String(prompt.to_string())).await
    }

    /// Generate an image from a prompt taken from a JSON payload.
    ///
    /// Validation and configuration failures return before any network I/O.
    pub async fn generate(&self, prompt: &Value) -> GenerationResult {
        let span = tracing::info_span!(
            "generate",
            request_id = %Uuid::new_v4(),
            provider = self.provider.name()
        );

        async {
            let result = self.run(prompt).await;
            match &result {
                Ok(image) => tracing::info!(bytes = image.bytes.len(), "Image generated"),
                Err(Error::Config(message)) => tracing::error!("Gateway misconfigured: {message}"),
                Err(Error::Validation(message)) => tracing::info!("Rejected prompt: {message}"),
                Err(e) => tracing::warn!("Image generation failed: {e}"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run(&self, prompt: &Value) -> GenerationResult {
        let prompt = Prompt::from_value(prompt)?;

        let api_key = self.api_key.as_deref().ok_or_else(|| {
            Error::config("no credential configured for the image provider")
        })?;

        tracing::info!("Generating image for prompt: {prompt}");

        let request = GenerationRequest::new(prompt, self.params.clone());
        let bytes = self.call_provider(api_key, &request).await?;

        Ok(GeneratedImage {
            bytes,
            mime_type: self.provider.mime_type().to_string(),
            prompt: request.into_prompt().into_inner(),
        })
    }

    async fn call_provider(&self, api_key: &str, request: &GenerationRequest) -> Result<Vec<u8>, Error> {
        let body = self.provider.build_body(request)?;

        let response = self
            .client
            .post(self.provider.endpoint())
            .bearer_auth(api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, self.provider.accept())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::info!(status = status.as_u16(), "Provider responded");

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                "Provider error body: {}",
                truncate_chars(&error_text, MAX_DIAGNOSTIC_CHARS)
            );
            return Err(self.classify_failure(status, &error_text));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        let bytes = self.provider.decode(content_type.as_deref(), body)?;
        if bytes.is_empty() {
            return Err(Error::internal(format!(
                "{} returned an empty image payload",
                self.provider.name()
            )));
        }
        Ok(bytes)
    }

    /// Map a failed provider response onto a caller-facing error.
    fn classify_failure(&self, status: StatusCode, error_text: &str) -> Error {
        let message = match status {
            StatusCode::UNAUTHORIZED => AUTH_FAILED_MESSAGE.to_string(),
            StatusCode::SERVICE_UNAVAILABLE => MODEL_LOADING_MESSAGE.to_string(),
            StatusCode::TOO_MANY_REQUESTS => RATE_LIMITED_MESSAGE.to_string(),
            _ if self.expose_upstream_diagnostics && !error_text.trim().is_empty() => format!(
                "{GENERATION_FAILED_MESSAGE}: {}",
                truncate_chars(error_text.trim(), MAX_DIAGNOSTIC_CHARS)
            ),
            _ => GENERATION_FAILED_MESSAGE.to_string(),
        };
        Error::upstream(status.as_u16(), message)
    }
}

#[async_trait::async_trait]
impl ImageGenerator for Gateway {
    async fn generate(&self, prompt: &Value) -> GenerationResult {
        Gateway::generate(self, prompt).await
    }

    fn provider_name(&self) -> &str {
        self.provider.name()
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
