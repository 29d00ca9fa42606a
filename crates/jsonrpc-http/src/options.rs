//! Per-call options.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{Result, RpcClientError};

/// Options applied to a single call.
///
/// Built by chaining `with_*` methods; for the same field the later call
/// wins.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Extra headers appended to the outgoing request. They never replace
    /// `Content-Type`.
    pub headers: Option<HeaderMap>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the extra header set.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Append one header to the current extra header set.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| RpcClientError::InvalidHeader(format!("{}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| RpcClientError::InvalidHeader(format!("{}: {}", name, e)))?;
        self.headers
            .get_or_insert_with(HeaderMap::new)
            .append(name, value);
        Ok(self)
    }
}
