use std::sync::Arc;

use portfolio_mcp_gateway::config::{ServerConfig, TransportKind};
use portfolio_mcp_gateway::context::GatewayContext;
use portfolio_mcp_gateway::transport::http::HttpServer;
use portfolio_mcp_gateway::transport::stdio::StdioServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // stdout belongs to the stdio transport; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    let ctx = match GatewayContext::from_config(&config) {
        Ok(ctx) => Arc::new(ctx),
        Err(e) => {
            tracing::error!("failed to build tool registry: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        backend = %config.api_base_url,
        credentials = config.credentials.is_some(),
        public_tools = ?config.public_tools,
        "portfolio-mcp-gateway starting"
    );

    let result = match config.transport {
        TransportKind::Http => HttpServer::new(ctx, config.bind_addr).run().await,
        TransportKind::Stdio => StdioServer::new(ctx).run().await,
    };

    if let Err(e) = result {
        tracing::error!("fatal error: {e}");
        std::process::exit(1);
    }
}
