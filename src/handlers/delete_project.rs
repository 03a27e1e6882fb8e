use crate::backend::{BackendClient, BackendResult};
use crate::protocol::DeleteProjectParams;
use crate::registry::ToolName;

use super::ToolError;

/// Handle a `delete_project` tool call: `DELETE projects/{id}/`, no body.
pub async fn handle(
    params: DeleteProjectParams,
    backend: &BackendClient,
) -> Result<BackendResult, ToolError> {
    let id = params
        .project_id
        .path_segment()
        .map_err(|reason| ToolError::invalid_arguments(ToolName::DeleteProject, reason))?;

    Ok(backend.delete(&format!("projects/{id}/")).await)
}
