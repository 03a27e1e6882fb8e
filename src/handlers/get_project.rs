use crate::backend::{BackendClient, BackendResult};
use crate::protocol::GetProjectParams;
use crate::registry::ToolName;

use super::ToolError;

/// Handle a `get_project` tool call: `GET projects/{id}/`.
pub async fn handle(
    params: GetProjectParams,
    backend: &BackendClient,
) -> Result<BackendResult, ToolError> {
    let id = params
        .project_id
        .path_segment()
        .map_err(|reason| ToolError::invalid_arguments(ToolName::GetProject, reason))?;

    Ok(backend.get(&format!("projects/{id}/")).await)
}
