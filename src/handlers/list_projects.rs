use crate::backend::{BackendClient, BackendResult};

/// Handle a `list_projects` tool call: `GET projects/`.
pub async fn handle(backend: &BackendClient) -> BackendResult {
    backend.get("projects/").await
}
