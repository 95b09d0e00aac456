use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Serialize;

use crate::Error;

/// Result of a single generation.
pub type GenerationResult = Result<GeneratedImage, Error>;

/// Raw image bytes returned by the provider, along with the prompt that
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub prompt: String,
}

impl GeneratedImage {
    /// Render the image as a `data:` URI usable directly as an image source.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, BASE64.encode(&self.bytes))
    }

    pub fn to_response(&self) -> GenerateResponse {
        GenerateResponse {
            success: true,
            image: self.data_uri(),
            prompt: self.prompt.clone(),
        }
    }
}

/// Success body of the generate endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub image: String,
    pub prompt: String,
}

/// Error body of the generate endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&Error> for ErrorResponse {
    fn from(error: &Error) -> Self {
        Self {
            error: error.public_message(),
        }
    }
}
