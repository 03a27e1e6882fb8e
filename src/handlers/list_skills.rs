use crate::backend::{BackendClient, BackendResult};

/// Handle a `list_skills` tool call: `GET skills/`.
pub async fn handle(backend: &BackendClient) -> BackendResult {
    backend.get("skills/").await
}
