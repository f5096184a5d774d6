mod analysis;
mod config;
mod interpreter;
mod models;
mod service;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Request},
    middleware::{Next, from_fn},
};
use tracing::{Instrument, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::config::LlmConfig;
use crate::interpreter::QueryInterpreter;
use crate::service::AppState;

/// Initialize structured tracing based on environment variables
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "location_advisor_service=debug,tower_http=debug".into());

    match log_format.as_str() {
        "pretty" => {
            // Human-readable logging for development
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        _ => {
            // Structured JSON logging for production
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
    }
}

/// Middleware to add a correlation ID to all requests
async fn correlation_id_middleware(
    mut request: Request<axum::body::Body>,
    next: Next,
) -> axum::response::Response {
    let correlation_id = Uuid::new_v4().to_string();

    request.headers_mut().insert(
        "x-correlation-id",
        HeaderValue::from_str(&correlation_id).unwrap(),
    );

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
    next.run(request).instrument(span).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // Resolved once; nothing re-reads the environment per request.
    let config = LlmConfig::from_env();
    info!(
        mode = if config.llm_mode() { "llm" } else { "simulation" },
        "Starting location advisor service"
    );

    let state = AppState {
        interpreter: Arc::new(QueryInterpreter::new(config)),
    };

    let app = service::build_router(state).layer(from_fn(correlation_id_middleware));

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3000);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;

    info!("Server running on http://0.0.0.0:{}", port);
    info!("Available endpoints:");
    info!("  GET  /health    - Health check");
    info!("  POST /analyze   - Run a location analysis");
    info!("  GET  /status    - LLM connectivity status");
    info!("  POST /test-llm  - Probe an OpenAI-compatible endpoint");

    axum::serve(listener, app).await?;

    Ok(())
}
