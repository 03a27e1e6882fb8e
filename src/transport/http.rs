//! Axum router and server for the MCP HTTP transport.
//!
//! Routes: `POST /mcp` and `POST /` (JSON-RPC), `GET /mcp` and `GET /`
//! (server description), `GET /health` (liveness). Replies are plain JSON
//! unless the client accepts `text/event-stream`, in which case the same
//! JSON goes out as a single SSE `data:` frame.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::context::GatewayContext;
use crate::handlers::{self, SERVER_NAME};
use crate::protocol::{error_codes, JsonRpcError, JsonRpcResponse};

use super::{decode, Incoming, TransportError};

const EVENT_STREAM: &str = "text/event-stream";

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<GatewayContext>,
}

/// Builds the axum `Router` with all MCP routes and the CORS layer.
pub fn build_router(ctx: Arc<GatewayContext>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_info).post(handle_mcp))
        .route("/mcp", get(handle_info).post(handle_mcp))
        .route("/health", get(handle_health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { ctx })
}

async fn handle_health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn handle_info() -> impl IntoResponse {
    Json(json!({
        "name": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "transport": "http",
        "status": "ok"
    }))
}

async fn handle_mcp(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let wants_sse = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains(EVENT_STREAM));

    let response = match decode(&body) {
        Incoming::Request(req) => handlers::dispatch(&req, &state.ctx).await,
        Incoming::Notification(method) => {
            tracing::debug!(%method, "notification accepted");
            return StatusCode::ACCEPTED.into_response();
        }
        Incoming::Malformed(e) => {
            tracing::warn!(error = %e, "parse error");
            JsonRpcResponse::error(None, JsonRpcError::parse_error())
        }
    };

    encode(&response, wants_sse)
}

fn encode(response: &JsonRpcResponse, sse: bool) -> Response {
    let body = match response.to_json() {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "failed to encode response");
            let body = json!({
                "jsonrpc": "2.0",
                "id": null,
                "error": { "code": error_codes::SERVER_ERROR, "message": e.to_string() }
            });
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
        }
    };

    if sse {
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, EVENT_STREAM),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            format!("data: {body}\n\n"),
        )
            .into_response()
    } else {
        (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], body).into_response()
    }
}

/// Axum-based HTTP server for the MCP JSON-RPC transport.
pub struct HttpServer {
    addr: SocketAddr,
    ctx: Arc<GatewayContext>,
}

impl HttpServer {
    pub fn new(ctx: Arc<GatewayContext>, addr: SocketAddr) -> Self {
        Self { addr, ctx }
    }

    /// Starts the server and blocks until it exits or receives Ctrl-C.
    pub async fn run(self) -> Result<(), TransportError> {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|e| TransportError::Bind {
                addr: self.addr.to_string(),
                source: e,
            })?;

        tracing::info!(addr = %self.addr, "MCP HTTP transport ready");

        axum::serve(listener, build_router(self.ctx))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| TransportError::Serve(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
