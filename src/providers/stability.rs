use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bytes::Bytes;

use super::stability_types::{StabilityRequest, StabilityResponse, StabilityTextPrompt};
use crate::provider::ImageProvider;
use crate::{Error, GenerationParams, GenerationRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.stability.ai";
pub const DEFAULT_ENGINE: &str = "stable-diffusion-xl-1024-v1-0";

/// Stability AI adapter.
///
/// The response is JSON with the image base64-encoded in the first artifact.
#[derive(Debug, Clone)]
pub struct StabilityProvider {
    base_url: String,
    engine: String,
}

impl StabilityProvider {
    /// Create a new Stability adapter for the default engine.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            engine: DEFAULT_ENGINE.to_string(),
        }
    }

    /// Create a new adapter with a custom base URL (for testing).
    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            engine: DEFAULT_ENGINE.to_string(),
        }
    }

    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    pub fn engine(&self) -> &str {
        &self.engine
    }

    /// Deployment defaults for this provider.
    pub fn default_params(&self) -> GenerationParams {
        GenerationParams::new(self.engine.clone())
            .with_steps(30)
            .with_guidance_scale(7.0)
            .with_dimensions(1024, 1024)
    }

    fn convert_request(request: &GenerationRequest) -> StabilityRequest {
        let params = request.params();
        StabilityRequest {
            text_prompts: vec![StabilityTextPrompt {
                text: request.prompt().as_str().to_string(),
                weight: 1.0,
            }],
            cfg_scale: params.guidance_scale,
            height: params.height,
            width: params.width,
            steps: params.steps,
            samples: params.samples,
        }
    }
}

impl Default for StabilityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageProvider for StabilityProvider {
    fn name(&self) -> &str {
        "stability"
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/generation/{}/text-to-image", self.base_url, self.engine)
    }

    fn accept(&self) -> &'static str {
        "application/json"
    }

    fn build_body(&self, request: &GenerationRequest) -> Result<serde_json::Value, Error> {
        Ok(serde_json::to_value(Self::convert_request(request))?)
    }

    fn decode(&self, _content_type: Option<&str>, body: Bytes) -> Result<Vec<u8>, Error> {
        let response: StabilityResponse = serde_json::from_slice(&body)?;
        let artifact = response
            .artifacts
            .into_iter()
            .next()
            .ok_or_else(|| Error::internal("Stability response contained no artifacts"))?;

        if let Some(reason) = artifact.finish_reason.as_deref() {
            tracing::debug!(finish_reason = reason, seed = ?artifact.seed, "Stability artifact received");
        }

        Ok(BASE64.decode(artifact.base64.trim().as_bytes())?)
    }
}
