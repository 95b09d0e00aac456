use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bytes::Bytes;

use super::huggingface_types::{HuggingFaceParameters, HuggingFaceRequest};
use crate::provider::ImageProvider;
use crate::{Error, GenerationParams, GenerationRequest};

pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_MODEL: &str = "stabilityai/stable-diffusion-xl-base-1.0";

/// Hugging Face inference API adapter.
///
/// The response body is the image itself. Binary bodies are used as-is;
/// text bodies are expected to carry the image as base64.
#[derive(Debug, Clone)]
pub struct HuggingFaceProvider {
    base_url: String,
    model: String,
}

impl HuggingFaceProvider {
    /// Create a new Hugging Face adapter for the default model.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create a new adapter with a custom base URL (for testing or mirrors).
    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Deployment defaults for this provider.
    pub fn default_params(&self) -> GenerationParams {
        GenerationParams::new(self.model.clone())
            .with_steps(30)
            .with_guidance_scale(7.5)
            .with_dimensions(1024, 1024)
    }

    fn convert_request(request: &GenerationRequest) -> HuggingFaceRequest {
        let params = request.params();
        HuggingFaceRequest {
            inputs: request.prompt().as_str().to_string(),
            parameters: HuggingFaceParameters {
                num_inference_steps: params.steps,
                guidance_scale: params.guidance_scale,
                width: params.width,
                height: params.height,
            },
        }
    }

    fn is_binary(content_type: Option<&str>) -> bool {
        match content_type {
            None => true,
            Some(value) => {
                let value = value.trim().to_ascii_lowercase();
                value.starts_with("image/") || value.starts_with("application/octet-stream")
            }
        }
    }
}

impl Default for HuggingFaceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageProvider for HuggingFaceProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}", self.base_url, self.model)
    }

    fn accept(&self) -> &'static str {
        "image/png"
    }

    fn build_body(&self, request: &GenerationRequest) -> Result<serde_json::Value, Error> {
        Ok(serde_json::to_value(Self::convert_request(request))?)
    }

    fn decode(&self, content_type: Option<&str>, body: Bytes) -> Result<Vec<u8>, Error> {
        if Self::is_binary(content_type) {
            return Ok(body.to_vec());
        }

        let text = std::str::from_utf8(&body)
            .map_err(|e| Error::internal(format!("Hugging Face text body is not UTF-8: {e}")))?
            .trim();
        // Some mirrors wrap the payload as a data URI.
        let encoded = match text.split_once(";base64,") {
            Some((prefix, payload)) if prefix.starts_with("data:") => payload,
            _ => text,
        };
        Ok(BASE64.decode(encoded.as_bytes())?)
    }
}
