use serde_json::{Map, Value};

use crate::backend::{BackendClient, BackendResult};
use crate::protocol::UpdateProjectParams;
use crate::registry::ToolName;

use super::ToolError;

/// Handle an `update_project` tool call: `PUT projects/{id}/`.
pub async fn handle(
    params: UpdateProjectParams,
    backend: &BackendClient,
) -> Result<BackendResult, ToolError> {
    let id = params
        .project_id
        .path_segment()
        .map_err(|reason| ToolError::invalid_arguments(ToolName::UpdateProject, reason))?;

    let payload = partial_update_payload(params.fields);
    Ok(backend.put(&format!("projects/{id}/"), &payload).await)
}

/// Keep every supplied field except those set to `null`.
pub fn partial_update_payload(fields: Map<String, Value>) -> Value {
    Value::Object(fields.into_iter().filter(|(_, v)| !v.is_null()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_fields_are_dropped() {
        let fields = json!({"title": "X", "description": null, "featured": false});
        let Value::Object(fields) = fields else { unreachable!() };
        assert_eq!(
            partial_update_payload(fields),
            json!({"title": "X", "featured": false})
        );
    }

    #[test]
    fn all_null_yields_empty_object() {
        let Value::Object(fields) = json!({"title": null}) else { unreachable!() };
        assert_eq!(partial_update_payload(fields), json!({}));
    }
}
