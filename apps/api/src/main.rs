mod compose;
mod config;
mod errors;
mod extract;
mod generation;
mod layout;
mod llm_client;
mod profile;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::layout::FontSet;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tailor v{}", env!("CARGO_PKG_VERSION"));

    // Fonts are a hard requirement; refuse to start without them.
    let font_source = config.font_source();
    let fonts = FontSet::load(&font_source).context("failed to load fonts")?;
    info!(
        source = ?font_source,
        embedded = fonts.is_embedded(),
        compress = config.pdf_compress,
        "Fonts loaded"
    );

    let llm = LlmClient::new(config.anthropic_api_key.clone()).context("failed to build LLM client")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let sections = config.section_set();
    info!(sections = ?sections.rendered_titles(), "Section labels configured");

    let state = AppState::new(Arc::new(llm), fonts, sections, config.pdf_compress);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
