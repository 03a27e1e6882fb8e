//! HTTP client for the portfolio REST backend.
//!
//! Every call issues exactly one request and folds any failure (network,
//! non-2xx status, undecodable body) into a [`BackendError`] value. Nothing
//! here retries, caches, or sets a timeout.

use reqwest::{Client, Method};
use serde_json::Value;

use crate::config::{Credentials, ServerConfig, CLIENT_ID_HEADER, CLIENT_SECRET_HEADER};

/// Outcome of a backend call: decoded JSON body or a uniform error.
pub type BackendResult = Result<Value, BackendError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("HTTP {code}: {reason}")]
    Status { code: u16, reason: String },
    #[error("Invalid JSON response: {0}")]
    Decode(String),
}

impl BackendError {
    /// The `{ "error": message }` payload handed back to RPC callers.
    pub fn to_payload(&self) -> Value {
        serde_json::json!({ "error": self.to_string() })
    }
}

/// Thin REST client bound to one base URL.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl BackendClient {
    /// `base_url` is used verbatim as a prefix; relative paths are appended
    /// without normalization.
    pub fn new(base_url: impl Into<String>, credentials: Option<Credentials>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            credentials,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.api_base_url.clone(), config.credentials.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, path: &str) -> BackendResult {
        self.call(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> BackendResult {
        self.call(Method::POST, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> BackendResult {
        self.call(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> BackendResult {
        self.call(Method::DELETE, path, None).await
    }

    async fn call(&self, method: Method, path: &str, body: Option<&Value>) -> BackendResult {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "backend request");

        let mut request = self.http.request(method.clone(), &url);
        if let Some(creds) = &self.credentials {
            request = request
                .header(CLIENT_ID_HEADER, &creds.client_id)
                .header(CLIENT_SECRET_HEADER, &creds.client_secret);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let result = send(request).await;
        if let Err(err) = &result {
            tracing::warn!(%method, %url, error = %err, "backend call failed");
        }
        result
    }
}

async fn send(request: reqwest::RequestBuilder) -> BackendResult {
    let response = request
        .send()
        .await
        .map_err(|e| BackendError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(BackendError::Status {
            code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| BackendError::Transport(e.to_string()))?;

    // 204 No Content and friends
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_embeds_code_and_reason() {
        let err = BackendError::Status {
            code: 404,
            reason: "Not Found".into(),
        };
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
        assert_eq!(
            serde_json::to_string(&err.to_payload()).unwrap(),
            r#"{"error":"HTTP 404: Not Found"}"#
        );
    }

    #[test]
    fn base_url_is_kept_verbatim() {
        let client = BackendClient::new("https://api.example.com/v1/", None);
        assert_eq!(client.base_url(), "https://api.example.com/v1/");
    }
}
