//! mdroute server entry point.
//!
//! Boots a headless fragment router against the configured document server and exposes it as an
//! MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use mdroute_core::AppConfig;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod state;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    tracing::info!(base_url = %config.base_url, "Starting mdroute server on stdio transport");

    let state = Arc::new(state::AppState::from_config(&config)?);
    let loaded = state.router.start().await;
    tracing::info!(loaded, fragment = %state.view().fragment, "initial navigation finished");

    let handler = handler::MdRouteServer::new(state);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
