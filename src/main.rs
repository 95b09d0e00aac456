use std::sync::Arc;

use imagegen_gateway::server::{self, AppState};
use imagegen_gateway::{Gateway, GatewayConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();
    init_logging();

    let config = GatewayConfig::from_env()?;
    tracing::info!(?config, "Loaded configuration");

    if !config.has_credential() {
        tracing::error!(
            "{} is not set; every generation request will fail with a configuration error",
            config.provider_type.api_key_var()
        );
    }

    let gateway = Gateway::new(&config)?;
    let state = AppState::new(Arc::new(gateway));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Image gateway listening on {}", config.bind_addr);

    server::serve(state, listener).await?;
    Ok(())
}
