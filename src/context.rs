use crate::backend::BackendClient;
use crate::config::ServerConfig;
use crate::registry::ToolRegistry;
use crate::schema::SchemaError;

/// Everything a dispatch needs, built once at startup and shared read-only
/// by every request.
#[derive(Debug)]
pub struct GatewayContext {
    pub registry: ToolRegistry,
    pub backend: BackendClient,
}

impl GatewayContext {
    pub fn new(registry: ToolRegistry, backend: BackendClient) -> Self {
        Self { registry, backend }
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, SchemaError> {
        let registry = ToolRegistry::new(config.public_tools.clone())?;
        Ok(Self::new(registry, BackendClient::from_config(config)))
    }
}
