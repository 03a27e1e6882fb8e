use crate::backend::{BackendClient, BackendResult};
use crate::protocol::CreateProjectParams;
use crate::registry::ToolName;

use super::ToolError;

/// Handle a `create_project` tool call: `POST projects/`.
///
/// The payload carries the three required fields plus whichever optional
/// fields the caller set.
pub async fn handle(
    params: CreateProjectParams,
    backend: &BackendClient,
) -> Result<BackendResult, ToolError> {
    let payload = serde_json::to_value(&params)
        .map_err(|e| ToolError::invalid_arguments(ToolName::CreateProject, e.to_string()))?;

    Ok(backend.post("projects/", &payload).await)
}
