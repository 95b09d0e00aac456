//! A server-side proxy for text-to-image providers.
//!
//! Callers send a short prompt; the gateway validates it, forwards it to the
//! configured provider (Hugging Face inference or Stability AI) with the
//! deployment's credential, and returns the image as a data URI. Provider
//! failures are normalized into a small set of caller-facing errors.

pub mod config;
pub mod error;
pub mod factory;
pub mod gateway;
pub mod provider;
pub mod providers;
pub mod server;
pub mod types;

// Re-export core types for easy usage
pub use config::GatewayConfig;
pub use error::Error;
pub use factory::{ProviderFactory, ProviderType};
pub use gateway::{Gateway, ImageGenerator};
pub use provider::ImageProvider;
pub use providers::*;
pub use types::*;
