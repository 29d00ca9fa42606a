//! Transport configuration and the shared default transport.

use std::collections::HashMap;
use std::sync::OnceLock;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{Result, RpcClientError};

pub const ENV_TIMEOUT_SECS: &str = "JSONRPC_HTTP_TIMEOUT_SECS";
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "JSONRPC_HTTP_CONNECT_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "JSONRPC_HTTP_USER_AGENT";

/// Settings used to build a dedicated `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Whole-request timeout enforced by the transport (default: none)
    pub timeout: Option<Duration>,
    /// TCP connect timeout (default: none)
    pub connect_timeout: Option<Duration>,
    /// `User-Agent` sent with every request
    pub user_agent: String,
    /// Headers sent with every request made through this transport
    pub default_headers: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: None,
            user_agent: format!("jsonrpc-http/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `JSONRPC_HTTP_*` environment variables.
    ///
    /// Unparseable numeric values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(secs) = env_secs(ENV_TIMEOUT_SECS) {
            config.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(secs) = env_secs(ENV_CONNECT_TIMEOUT_SECS) {
            config.connect_timeout = Some(Duration::from_secs(secs));
        }
        if let Ok(ua) = std::env::var(ENV_USER_AGENT) {
            if !ua.trim().is_empty() {
                config.user_agent = ua;
            }
        }
        config
    }

    /// Build a transport from these settings.
    pub fn build_transport(&self) -> Result<reqwest::Client> {
        let mut headers = HeaderMap::new();
        for (key, value) in &self.default_headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| RpcClientError::InvalidHeader(format!("{}: {}", key, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| RpcClientError::InvalidHeader(format!("{}: {}", key, e)))?;
            headers.append(name, value);
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(self.user_agent.clone())
            .default_headers(headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        let client = builder.build().map_err(RpcClientError::Transport)?;
        tracing::debug!(
            "[JsonRpcClient] Built transport (timeout={:?}, connect_timeout={:?})",
            self.timeout,
            self.connect_timeout
        );
        Ok(client)
    }
}

fn env_secs(key: &str) -> Option<u64> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(secs) => Some(secs),
        Err(e) => {
            tracing::warn!("[JsonRpcClient] Ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}

static DEFAULT_TRANSPORT: OnceLock<reqwest::Client> = OnceLock::new();

/// Process-wide transport used by clients built without one.
///
/// Initialised on first use and shared by every such client, so connection
/// pooling spans all of them.
pub fn default_transport() -> &'static reqwest::Client {
    DEFAULT_TRANSPORT.get_or_init(reqwest::Client::new)
}
