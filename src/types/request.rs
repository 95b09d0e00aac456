use serde::{Deserialize, Serialize};

use super::Prompt;

/// Generation parameters that stay constant for a deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub model: String,
    pub steps: u32,
    pub guidance_scale: f32,
    pub width: u32,
    pub height: u32,
    pub samples: u32,
}

impl GenerationParams {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            steps: 30,
            guidance_scale: 7.5,
            width: 1024,
            height: 1024,
            samples: 1,
        }
    }

    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_guidance_scale(mut self, guidance_scale: f32) -> Self {
        self.guidance_scale = guidance_scale;
        self
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// A validated prompt paired with the deployment's generation parameters.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    prompt: Prompt,
    params: GenerationParams,
}

impl GenerationRequest {
    pub fn new(prompt: Prompt, params: GenerationParams) -> Self {
        Self { prompt, params }
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub fn into_prompt(self) -> Prompt {
        self.prompt
    }
}
