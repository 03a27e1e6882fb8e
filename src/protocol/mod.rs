pub mod request;
pub mod response;

pub use request::{
    CreateProjectParams, DeleteProjectParams, GetProjectParams, JsonRpcRequest, ProjectId, RpcId,
    ToolCallParams, UpdateProjectParams,
};
pub use response::{error_codes, JsonRpcError, JsonRpcResponse, ToolResult, ToolResultContent};
