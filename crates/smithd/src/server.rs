//! HTTP server for smithd

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::ollama::OllamaClient;
use crate::routes;

/// Application state shared across handlers. Built once at startup;
/// requests themselves are stateless.
pub struct AppState {
    pub config: Config,
    pub ollama: OllamaClient,
    pub server_ip: String,
}

pub type AppStateArc = Arc<AppState>;

impl AppState {
    pub fn new(config: Config, ollama: OllamaClient, server_ip: String) -> Self {
        Self {
            config,
            ollama,
            server_ip,
        }
    }
}

/// Build the full application router
pub fn router(state: AppStateArc) -> Router {
    Router::new()
        .merge(routes::service_routes())
        .merge(routes::health_routes())
        .merge(routes::query_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server
pub async fn run(state: AppState) -> Result<()> {
    let bind_addr = state.config.server.bind_addr.clone();
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
