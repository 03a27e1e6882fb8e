pub mod create_project;
pub mod delete_project;
pub mod get_project;
pub mod list_projects;
pub mod list_skills;
pub mod update_project;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::backend::BackendResult;
use crate::context::GatewayContext;
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolCallParams, ToolResult};
use crate::registry::{ToolDescriptor, ToolName};

/// MCP protocol revision announced by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const SERVER_NAME: &str = "portfolio-mcp-gateway";

/// Failures while turning RPC arguments into a backend call. Always
/// reported as JSON-RPC `-32000`.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Invalid tools/call params: {0}")]
    InvalidCall(String),
    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: ToolName, reason: String },
    #[error("Failed to encode tool result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ToolError {
    pub fn invalid_arguments(tool: ToolName, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool,
            reason: reason.into(),
        }
    }
}

impl From<ToolError> for JsonRpcError {
    fn from(err: ToolError) -> Self {
        JsonRpcError::server_error(err.to_string())
    }
}

#[derive(Serialize)]
struct ToolsListResult<'a> {
    tools: Vec<&'a ToolDescriptor>,
}

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Stateless: the outcome depends only on the request, the immutable
/// context and whatever the backend answers.
pub async fn dispatch(req: &JsonRpcRequest, ctx: &GatewayContext) -> JsonRpcResponse {
    tracing::debug!(method = %req.method, "dispatching request");

    let outcome = match req.method.as_str() {
        "initialize" => Ok(initialize_result()),
        "tools/list" => tools_list(ctx),
        "tools/call" => tools_call(req.params.as_ref(), ctx).await,
        other => Err(JsonRpcError::method_not_found(other)),
    };

    match outcome {
        Ok(result) => JsonRpcResponse::success(req.id.clone(), result),
        Err(error) => JsonRpcResponse::error(req.id.clone(), error),
    }
}

/// Static capability descriptor; identical on every call.
pub fn initialize_result() -> Value {
    serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

fn tools_list(ctx: &GatewayContext) -> Result<Value, JsonRpcError> {
    let result = ToolsListResult {
        tools: ctx.registry.public_descriptors(),
    };
    serde_json::to_value(result).map_err(|e| ToolError::from(e).into())
}

async fn tools_call(params: Option<&Value>, ctx: &GatewayContext) -> Result<Value, JsonRpcError> {
    let params: ToolCallParams = match params {
        Some(v) => serde_json::from_value(v.clone())
            .map_err(|e| ToolError::InvalidCall(e.to_string()))?,
        None => return Err(ToolError::InvalidCall("missing params".into()).into()),
    };

    // Visibility before existence: private and nonexistent tools look alike.
    if !ctx.registry.is_public(&params.name) {
        tracing::warn!(tool = %params.name, "rejected call to non-public tool");
        return Err(JsonRpcError::tool_not_available(&params.name));
    }
    let Some(tool) = ctx.registry.lookup(&params.name) else {
        return Err(JsonRpcError::unknown_tool(&params.name));
    };

    let arguments = Value::Object(params.arguments.unwrap_or_default());
    let outcome = run_tool(tool, arguments, ctx).await.map_err(|err| {
        tracing::warn!(%tool, error = %err, "tool call failed");
        JsonRpcError::from(err)
    })?;

    // Backend failures stay inside a successful envelope.
    let payload = match outcome {
        Ok(value) => value,
        Err(err) => err.to_payload(),
    };
    let text = serde_json::to_string(&payload).map_err(ToolError::from)?;
    serde_json::to_value(ToolResult::text(text)).map_err(|e| ToolError::from(e).into())
}

async fn run_tool(
    tool: ToolName,
    arguments: Value,
    ctx: &GatewayContext,
) -> Result<BackendResult, ToolError> {
    if let Some(validator) = ctx.registry.validator(tool) {
        validator
            .check(&arguments)
            .map_err(|reason| ToolError::invalid_arguments(tool, reason))?;
    }

    let backend = &ctx.backend;
    match tool {
        ToolName::ListProjects => Ok(list_projects::handle(backend).await),
        ToolName::ListSkills => Ok(list_skills::handle(backend).await),
        ToolName::GetProject => get_project::handle(parse_args(tool, arguments)?, backend).await,
        ToolName::CreateProject => {
            create_project::handle(parse_args(tool, arguments)?, backend).await
        }
        ToolName::UpdateProject => {
            update_project::handle(parse_args(tool, arguments)?, backend).await
        }
        ToolName::DeleteProject => {
            delete_project::handle(parse_args(tool, arguments)?, backend).await
        }
    }
}

fn parse_args<T: DeserializeOwned>(tool: ToolName, arguments: Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(tool, e.to_string()))
}
