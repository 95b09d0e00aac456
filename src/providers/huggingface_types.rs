use serde::Serialize;

/// Hugging Face inference API request for text-to-image models.
#[derive(Debug, Clone, Serialize)]
pub struct HuggingFaceRequest {
    pub inputs: String,
    pub parameters: HuggingFaceParameters,
}

/// Generation parameters understood by diffusers-backed inference endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct HuggingFaceParameters {
    pub num_inference_steps: u32,
    pub guidance_scale: f32,
    pub width: u32,
    pub height: u32,
}
