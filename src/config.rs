use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use crate::{Error, ProviderType};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(60);

/// Process-wide configuration, built once at startup and handed to the
/// gateway. Nothing on the request path reads the environment.
#[derive(Clone)]
pub struct GatewayConfig {
    pub provider_type: ProviderType,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub upstream_timeout: Duration,
    pub expose_upstream_diagnostics: bool,
    pub bind_addr: SocketAddr,
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("provider_type", &self.provider_type)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("expose_upstream_diagnostics", &self.expose_upstream_diagnostics)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

impl GatewayConfig {
    /// Create configuration for a provider with default settings.
    pub fn new(provider_type: ProviderType) -> Self {
        Self {
            provider_type,
            api_key: None,
            base_url: None,
            model: None,
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            expose_upstream_diagnostics: false,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into()).filter(|key| !key.trim().is_empty());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    pub fn with_upstream_diagnostics(mut self, expose: bool) -> Self {
        self.expose_upstream_diagnostics = expose;
        self
    }

    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    /// Whether a provider credential is available.
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let provider_type = match var("IMAGE_PROVIDER") {
            Some(name) => name.parse::<ProviderType>()?,
            None => ProviderType::HuggingFace,
        };

        let mut config = Self::new(provider_type.clone());

        config.api_key = var(provider_type.api_key_var()).or_else(|| var("IMAGE_PROVIDER_API_KEY"));
        config.base_url = var("IMAGE_PROVIDER_BASE_URL");
        config.model = var("IMAGE_PROVIDER_MODEL");

        if let Some(raw) = var("UPSTREAM_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().map_err(|_| {
                Error::config(format!("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"))
            })?;
            if secs == 0 {
                return Err(Error::config("UPSTREAM_TIMEOUT_SECS must be greater than zero"));
            }
            config.upstream_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = var("EXPOSE_UPSTREAM_DIAGNOSTICS") {
            config.expose_upstream_diagnostics = parse_flag(&raw).ok_or_else(|| {
                Error::config(format!("EXPOSE_UPSTREAM_DIAGNOSTICS must be true or false, got '{raw}'"))
            })?;
        }

        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        config.bind_addr = bind_addr
            .parse()
            .map_err(|_| Error::config(format!("Invalid BIND_ADDR '{bind_addr}'")))?;

        if let Some(port) = var("PORT") {
            let port: u16 = port
                .parse()
                .map_err(|_| Error::config(format!("Invalid PORT '{port}'")))?;
            config.bind_addr.set_port(port);
        }

        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.provider_type, ProviderType::HuggingFace);
        assert!(!config.has_credential());
        assert_eq!(config.upstream_timeout, Duration::from_secs(60));
        assert!(!config.expose_upstream_diagnostics);
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn test_provider_specific_key() {
        let config = GatewayConfig::from_lookup(lookup(&[
            ("IMAGE_PROVIDER", "stability"),
            ("STABILITY_API_KEY", "sk-stability"),
            ("HUGGINGFACE_API_KEY", "hf-unused"),
        ]))
        .unwrap();
        assert_eq!(config.provider_type, ProviderType::Stability);
        assert_eq!(config.api_key.as_deref(), Some("sk-stability"));
    }

    #[test]
    fn test_generic_key_fallback_and_blank_values() {
        let config = GatewayConfig::from_lookup(lookup(&[
            ("HUGGINGFACE_API_KEY", "   "),
            ("IMAGE_PROVIDER_API_KEY", "hf-generic"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("hf-generic"));

        let config = GatewayConfig::from_lookup(lookup(&[("HUGGINGFACE_API_KEY", "")])).unwrap();
        assert!(!config.has_credential());
    }

    #[test]
    fn test_overrides() {
        let config = GatewayConfig::from_lookup(lookup(&[
            ("UPSTREAM_TIMEOUT_SECS", "15"),
            ("EXPOSE_UPSTREAM_DIAGNOSTICS", "yes"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("PORT", "9090"),
            ("IMAGE_PROVIDER_MODEL", "runwayml/stable-diffusion-v1-5"),
        ]))
        .unwrap();
        assert_eq!(config.upstream_timeout, Duration::from_secs(15));
        assert!(config.expose_upstream_diagnostics);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:9090");
        assert_eq!(config.model.as_deref(), Some("runwayml/stable-diffusion-v1-5"));
    }

    #[test]
    fn test_invalid_values() {
        for vars in [
            [("IMAGE_PROVIDER", "dalle")],
            [("UPSTREAM_TIMEOUT_SECS", "0")],
            [("UPSTREAM_TIMEOUT_SECS", "soon")],
            [("EXPOSE_UPSTREAM_DIAGNOSTICS", "maybe")],
            [("BIND_ADDR", "localhost")],
            [("PORT", "99999")],
        ] {
            let result = GatewayConfig::from_lookup(lookup(&vars));
            assert!(matches!(result, Err(Error::Config(_))), "{vars:?}");
        }
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = GatewayConfig::new(ProviderType::HuggingFace).with_api_key("hf-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hf-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
