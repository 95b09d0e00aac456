use std::fmt;
use std::str::FromStr;

use crate::providers::{HuggingFaceProvider, StabilityProvider};
use crate::{Error, GatewayConfig, GenerationParams, ImageProvider};

/// Supported image providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderType {
    HuggingFace,
    Stability,
}

impl ProviderType {
    /// Environment variable holding this provider's credential.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            ProviderType::HuggingFace => "HUGGINGFACE_API_KEY",
            ProviderType::Stability => "STABILITY_API_KEY",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderType::HuggingFace => f.write_str("huggingface"),
            ProviderType::Stability => f.write_str("stability"),
        }
    }
}

impl FromStr for ProviderType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "huggingface" | "hf" => Ok(ProviderType::HuggingFace),
            "stability" | "stabilityai" => Ok(ProviderType::Stability),
            _ => Err(Error::config(format!(
                "Invalid IMAGE_PROVIDER '{s}'. Valid values are: huggingface, stability"
            ))),
        }
    }
}

/// Factory for creating the deployment's provider adapter.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the adapter and its generation parameters from configuration.
    pub fn create(config: &GatewayConfig) -> (Box<dyn ImageProvider>, GenerationParams) {
        match config.provider_type {
            ProviderType::HuggingFace => {
                let mut provider = match &config.base_url {
                    Some(base_url) => HuggingFaceProvider::new_with_base_url(base_url.clone()),
                    None => HuggingFaceProvider::new(),
                };
                if let Some(model) = &config.model {
                    provider = provider.with_model(model.clone());
                }
                let params = provider.default_params();
                (Box::new(provider), params)
            }
            ProviderType::Stability => {
                let mut provider = match &config.base_url {
                    Some(base_url) => StabilityProvider::new_with_base_url(base_url.clone()),
                    None => StabilityProvider::new(),
                };
                if let Some(engine) = &config.model {
                    provider = provider.with_engine(engine.clone());
                }
                let params = provider.default_params();
                (Box::new(provider), params)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_type() {
        assert_eq!("huggingface".parse::<ProviderType>().unwrap(), ProviderType::HuggingFace);
        assert_eq!("HF".parse::<ProviderType>().unwrap(), ProviderType::HuggingFace);
        assert_eq!(" StabilityAI ".parse::<ProviderType>().unwrap(), ProviderType::Stability);

        let error = "midjourney".parse::<ProviderType>().unwrap_err();
        assert!(error.to_string().contains("midjourney"));
    }

    #[test]
    fn test_create_huggingface() {
        let config = GatewayConfig::new(ProviderType::HuggingFace)
            .with_base_url("http://127.0.0.1:8000")
            .with_model("acme/tiny-diffusion");
        let (provider, params) = ProviderFactory::create(&config);
        assert_eq!(provider.name(), "huggingface");
        assert_eq!(provider.endpoint(), "http://127.0.0.1:8000/models/acme/tiny-diffusion");
        assert_eq!(params.model, "acme/tiny-diffusion");
        assert_eq!(params.samples, 1);
    }

    #[test]
    fn test_create_stability() {
        let config = GatewayConfig::new(ProviderType::Stability);
        let (provider, params) = ProviderFactory::create(&config);
        assert_eq!(provider.name(), "stability");
        assert_eq!(provider.accept(), "application/json");
        assert_eq!(params.guidance_scale, 7.0);
        assert_eq!(params.samples, 1);
    }
}
