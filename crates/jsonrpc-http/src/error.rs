//! Client error type.
//!
//! `RpcClientError` covers every way a single call can fail. Local failures
//! wrap their underlying cause; a server-reported error is carried verbatim
//! in [`RpcClientError::Server`].

use reqwest::StatusCode;

use crate::rpc::JsonRpcError;

#[derive(Debug, thiserror::Error)]
pub enum RpcClientError {
    #[error("method is empty")]
    EmptyMethod,

    #[error("failed to marshal request: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to create new HTTP request: invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to post request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("server does not respond 200 OK: {0}")]
    Status(StatusCode),

    #[error("failed to decode response JSON: {0}")]
    DecodeResponse(#[source] serde_json::Error),

    #[error(transparent)]
    Server(#[from] JsonRpcError),

    #[error("response ID is not matched to request: expected {expected}, got {actual}")]
    IdMismatch { expected: String, actual: String },

    #[error("failed to decode result JSON: {0}")]
    DecodeResult(#[source] serde_json::Error),

    #[error("call cancelled")]
    Cancelled,

    #[error("call deadline exceeded")]
    DeadlineExceeded,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("failed to build HTTP transport: {0}")]
    Transport(#[source] reqwest::Error),
}

impl RpcClientError {
    /// The structured error, if the server reported one.
    pub fn server_error(&self) -> Option<&JsonRpcError> {
        match self {
            RpcClientError::Server(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RpcClientError::Cancelled)
    }

    /// Deadline from the call context, or a timeout configured on the transport.
    pub fn is_timeout(&self) -> bool {
        match self {
            RpcClientError::DeadlineExceeded => true,
            RpcClientError::Request(err) => err.is_timeout(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, RpcClientError>;
