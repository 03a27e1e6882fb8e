//! Wire transports. Both decode raw bytes into a [`JsonRpcRequest`], hand it
//! to [`crate::handlers::dispatch`] and encode whatever comes back.

pub mod http;
pub mod stdio;

use serde_json::Value;
use thiserror::Error;

use crate::protocol::JsonRpcRequest;

/// Errors that can occur while running a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to bind on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A decoded inbound message.
#[derive(Debug)]
pub enum Incoming {
    Request(JsonRpcRequest),
    /// Client notification (`notifications/*` without an `id` member); never answered.
    Notification(String),
    /// Not JSON, or JSON that is not a request object.
    Malformed(String),
}

pub fn decode(raw: &[u8]) -> Incoming {
    let value: Value = match serde_json::from_slice(raw) {
        Ok(v) => v,
        Err(e) => return Incoming::Malformed(e.to_string()),
    };

    let is_notification = value.get("id").is_none()
        && value
            .get("method")
            .and_then(Value::as_str)
            .is_some_and(|m| m.starts_with("notifications/"));
    if is_notification {
        let method = value["method"].as_str().unwrap_or_default().to_string();
        return Incoming::Notification(method);
    }

    match serde_json::from_value(value) {
        Ok(req) => Incoming::Request(req),
        Err(e) => Incoming::Malformed(e.to_string()),
    }
}
