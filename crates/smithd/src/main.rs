//! Smith Daemon - HTTP relay between voice clients and a local model.
//!
//! Accepts natural-language commands, extracts structured intents via
//! Ollama, and answers with a fixed five-field response.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use smithd::config::Config;
use smithd::net;
use smithd::ollama::OllamaClient;
use smithd::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Smith Daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load();
    let server_ip = net::detect_local_ip();

    info!("Detected local IP: {}", server_ip);
    info!("Ollama URL: {}", config.llm.ollama_url);
    info!("Model: {}", config.llm.model);

    let ollama = OllamaClient::new(&config.llm)?;
    let state = AppState::new(config, ollama, server_ip);

    server::run(state).await
}
