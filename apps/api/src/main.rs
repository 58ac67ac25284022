mod config;
mod errors;
mod labeling;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Labeler API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client; without a key every labeling request gets a 500.
    let generator: Option<Arc<dyn TextGenerator>> = match &config.openai_api_key {
        Some(key) => {
            let client = LlmClient::new(
                key.clone(),
                config.openai_base_url.clone(),
                Duration::from_secs(config.llm_timeout_secs),
            )?;
            info!(
                "LLM client initialized (model: {}, base url: {})",
                llm_client::MODEL,
                config.openai_base_url
            );
            Some(Arc::new(client))
        }
        None => {
            warn!("OPENAI_API_KEY is not set; /api/label will report the service as unavailable");
            None
        }
    };

    let state = AppState { generator };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
