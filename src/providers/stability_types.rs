use serde::{Deserialize, Serialize};

/// Stability AI v1 text-to-image request.
#[derive(Debug, Clone, Serialize)]
pub struct StabilityRequest {
    pub text_prompts: Vec<StabilityTextPrompt>,
    pub cfg_scale: f32,
    pub height: u32,
    pub width: u32,
    pub steps: u32,
    pub samples: u32,
}

/// A weighted prompt entry.
#[derive(Debug, Clone, Serialize)]
pub struct StabilityTextPrompt {
    pub text: String,
    pub weight: f32,
}

/// Stability AI v1 text-to-image response.
#[derive(Debug, Clone, Deserialize)]
pub struct StabilityResponse {
    #[serde(default)]
    pub artifacts: Vec<StabilityArtifact>,
}

/// One generated image.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StabilityArtifact {
    pub base64: String,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}
