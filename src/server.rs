//! The JSON boundary in front of the gateway.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::gateway::ImageGenerator;
use crate::{Error, ErrorResponse};

#[derive(Clone)]
pub struct AppState {
    generator: Arc<dyn ImageGenerator>,
}

impl AppState {
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self { generator }
    }
}

/// Build the router exposing the generate and health endpoints.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/generate", post(generate_handler))
        .route("/api/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the router until Ctrl-C.
pub async fn serve(state: AppState, listener: tokio::net::TcpListener) -> std::io::Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await
}

async fn generate_handler(State(state): State<AppState>, body: Bytes) -> Response {
    // A body that is not a JSON object has no prompt; let validation reject it.
    let prompt = serde_json::from_slice::<Value>(&body)
        .ok()
        .and_then(|mut payload| payload.get_mut("prompt").map(Value::take))
        .unwrap_or(Value::Null);

    match state.generator.generate(&prompt).await {
        Ok(image) => (StatusCode::OK, Json(image.to_response())).into_response(),
        Err(error) => error_response(&error),
    }
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "provider": state.generator.provider_name(),
        "configured": state.generator.is_configured(),
    }))
}

fn error_response(error: &Error) -> Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(error))).into_response()
}
