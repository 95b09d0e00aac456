//! Adapters for the supported text-to-image services.

pub mod huggingface;
pub mod huggingface_types;
pub mod stability;
pub mod stability_types;

// Re-export commonly used provider types
pub use huggingface::HuggingFaceProvider;
pub use stability::StabilityProvider;
