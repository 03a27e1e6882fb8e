use std::collections::BTreeSet;
use std::net::SocketAddr;

use url::Url;

use crate::registry::ToolName;

/// Default HTTP listen address.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8787";

/// Header names carrying the static backend credential pair.
pub const CLIENT_ID_HEADER: &str = "CF-Access-Client-Id";
pub const CLIENT_SECRET_HEADER: &str = "CF-Access-Client-Secret";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORTFOLIO_API_BASE_URL environment variable is not set")]
    MissingBaseUrl,
    #[error("PORTFOLIO_API_BASE_URL is not a valid http(s) URL: {0}")]
    InvalidBaseUrl(String),
    #[error("PORTFOLIO_API_CLIENT_ID and PORTFOLIO_API_CLIENT_SECRET must be set together")]
    IncompleteCredentials,
    #[error("MCP_PUBLIC_TOOLS names an unregistered tool: {0}")]
    UnknownTool(String),
    #[error("MCP_TRANSPORT must be `http` or `stdio`, got `{0}`")]
    InvalidTransport(String),
    #[error("MCP_BIND_ADDR is not a socket address: {0}")]
    InvalidBindAddr(String),
}

/// Static credential pair attached to every backend request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Http,
    Stdio,
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Backend base URL, always ending in `/`.
    pub api_base_url: String,
    pub credentials: Option<Credentials>,
    pub public_tools: BTreeSet<ToolName>,
    pub transport: TransportKind,
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Load configuration from environment.
    ///
    /// - `PORTFOLIO_API_BASE_URL` (required) — backend REST API root
    /// - `PORTFOLIO_API_CLIENT_ID` / `PORTFOLIO_API_CLIENT_SECRET` (optional pair)
    /// - `MCP_PUBLIC_TOOLS` (optional) — comma-separated visibility set
    /// - `MCP_TRANSPORT` (optional, default `http`) — `http` or `stdio`
    /// - `MCP_BIND_ADDR` (optional, default `0.0.0.0:8787`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let raw_base = var("PORTFOLIO_API_BASE_URL").ok_or(ConfigError::MissingBaseUrl)?;
        let api_base_url = normalize_base_url(&raw_base)?;

        let credentials = match (var("PORTFOLIO_API_CLIENT_ID"), var("PORTFOLIO_API_CLIENT_SECRET")) {
            (Some(client_id), Some(client_secret)) => Some(Credentials {
                client_id,
                client_secret,
            }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteCredentials),
        };

        let public_tools = match var("MCP_PUBLIC_TOOLS") {
            Some(list) => parse_public_tools(&list)?,
            None => ToolName::default_public(),
        };

        let transport = match var("MCP_TRANSPORT").as_deref() {
            None | Some("http") => TransportKind::Http,
            Some("stdio") => TransportKind::Stdio,
            Some(other) => return Err(ConfigError::InvalidTransport(other.to_string())),
        };

        let bind_raw = var("MCP_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_raw.clone()))?;

        Ok(Self {
            api_base_url,
            credentials,
            public_tools,
            transport,
            bind_addr,
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(raw).map_err(|e| ConfigError::InvalidBaseUrl(format!("{raw}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl(raw.to_string()));
    }

    let mut base = raw.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Ok(base)
}

fn parse_public_tools(list: &str) -> Result<BTreeSet<ToolName>, ConfigError> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            name.parse::<ToolName>()
                .map_err(|_| ConfigError::UnknownTool(name.to_string()))
        })
        .collect()
}
