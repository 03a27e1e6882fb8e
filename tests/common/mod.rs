//! In-process stand-in for the portfolio REST backend.
#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use portfolio_mcp_gateway::backend::BackendClient;
use portfolio_mcp_gateway::config::Credentials;
use portfolio_mcp_gateway::context::GatewayContext;
use portfolio_mcp_gateway::protocol::{JsonRpcRequest, RpcId};
use portfolio_mcp_gateway::registry::{ToolName, ToolRegistry};

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
    pub raw_body_len: usize,
}

#[derive(Clone)]
pub struct MockBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests().last().cloned().expect("backend saw no request")
    }

    pub fn client(&self) -> BackendClient {
        BackendClient::new(self.base_url.clone(), None)
    }

    pub fn client_with_credentials(&self) -> BackendClient {
        BackendClient::new(
            self.base_url.clone(),
            Some(Credentials {
                client_id: "client-id".into(),
                client_secret: "client-secret".into(),
            }),
        )
    }

    /// Context with the default visibility set.
    pub fn context(&self) -> GatewayContext {
        GatewayContext::new(ToolRegistry::with_default_visibility().unwrap(), self.client())
    }

    pub fn context_with_public(&self, public: &[ToolName]) -> GatewayContext {
        let public: BTreeSet<ToolName> = public.iter().copied().collect();
        GatewayContext::new(ToolRegistry::new(public).unwrap(), self.client())
    }
}

/// Spawn the mock on an ephemeral port. Its API root is `/api/`.
pub async fn spawn_backend() -> MockBackend {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .fallback(respond)
        .with_state(requests.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("addr").port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend");
    });

    MockBackend {
        base_url: format!("http://127.0.0.1:{port}/api/"),
        requests,
    }
}

/// Base URL of a port nothing listens on.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}/api/")
}

pub fn call_request(id: i64, name: &str, arguments: Value) -> JsonRpcRequest {
    JsonRpcRequest::new(
        Some(RpcId::from(id)),
        "tools/call",
        Some(json!({ "name": name, "arguments": arguments })),
    )
}

async fn respond(
    State(requests): State<Arc<Mutex<Vec<Recorded>>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let parsed_body = serde_json::from_slice::<Value>(&body).ok();
    requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        headers: headers
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect(),
        body: parsed_body.clone(),
        raw_body_len: body.len(),
    });

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    match (method.as_str(), segments.as_slice()) {
        ("GET", ["api", "skills"]) => json_response(StatusCode::OK, json!([{ "id": 1, "skill": "Go" }])),
        ("GET", ["api", "projects"]) => json_response(
            StatusCode::OK,
            json!([{ "id": 1, "title": "Gateway" }, { "id": 2, "title": "Compiler" }]),
        ),
        ("POST", ["api", "projects"]) => {
            let mut created = parsed_body.unwrap_or_else(|| json!({}));
            created["id"] = json!(10);
            json_response(StatusCode::CREATED, created)
        }
        ("GET", ["api", "projects", "404"]) => StatusCode::NOT_FOUND.into_response(),
        ("GET", ["api", "projects", "500"]) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        ("GET", ["api", "projects", "garbled"]) => (StatusCode::OK, "<html>oops</html>").into_response(),
        ("GET", ["api", "projects", id]) => {
            json_response(StatusCode::OK, json!({ "id": id, "title": "Gateway" }))
        }
        ("PUT", ["api", "projects", id]) => {
            let mut updated = parsed_body.unwrap_or_else(|| json!({}));
            updated["id"] = json!(id);
            json_response(StatusCode::OK, updated)
        }
        ("DELETE", ["api", "projects", _]) => StatusCode::NO_CONTENT.into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

fn json_response(status: StatusCode, body: Value) -> Response {
    (status, axum::Json(body)).into_response()
}
