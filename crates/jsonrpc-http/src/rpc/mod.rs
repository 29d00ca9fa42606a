//! Transport-agnostic JSON-RPC 2.0 protocol types.
//!
//! Everything in here is plain serde data; the HTTP exchange lives in
//! [`crate::client`].

pub mod error;
pub mod types;

pub use error::{ErrorCode, JsonRpcError};
pub use types::{JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
