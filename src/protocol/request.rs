use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON-RPC 2.0 ID — number or string, echoed back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(serde_json::Number),
    Str(String),
}

impl From<i64> for RpcId {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for RpcId {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

/// JSON-RPC 2.0 request envelope.
///
/// Only `method` is required; a missing or `null` id decodes to `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<RpcId>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn new(id: Option<RpcId>, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: Some("2.0".into()),
            id,
            method: method.into(),
            params,
        }
    }
}

/// Parameters for `tools/call`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Map<String, Value>>,
}

/// Backend identifier of a project, accepted as integer or string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ProjectId {
    Number(u64),
    Str(String),
}

impl ProjectId {
    /// Render as a single path segment, refusing anything that could
    /// escape `projects/{id}/`.
    ///
    /// String ids are limited to URL-unreserved characters and must not
    /// form a dot-segment.
    pub fn path_segment(&self) -> Result<String, String> {
        match self {
            Self::Number(n) => Ok(n.to_string()),
            Self::Str(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Err("project_id must not be empty".into());
                }
                let unreserved = s
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~'));
                if !unreserved || s.contains("..") || s == "." {
                    return Err(format!("project_id is not a valid path segment: {s}"));
                }
                Ok(s.to_string())
            }
        }
    }
}

/// Parameters for the `get_project` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct GetProjectParams {
    pub project_id: ProjectId,
}

/// Parameters for the `delete_project` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteProjectParams {
    pub project_id: ProjectId,
}

/// Parameters for the `create_project` tool; serializes directly into the
/// backend payload, leaving out unset optional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProjectParams {
    pub title: String,
    pub description: String,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

/// Parameters for the `update_project` tool: the id plus whatever fields
/// the caller supplied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProjectParams {
    pub project_id: ProjectId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}
